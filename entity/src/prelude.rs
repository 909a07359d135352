pub use super::cluster::Entity as Cluster;
pub use super::cluster_group::Entity as ClusterGroup;
pub use super::cluster_type::Entity as ClusterType;
pub use super::custom_field::Entity as CustomField;
pub use super::device::Entity as Device;
pub use super::journal_entry::Entity as JournalEntry;
pub use super::object_change::Entity as ObjectChange;
pub use super::rack::Entity as Rack;
pub use super::rack_role::Entity as RackRole;
pub use super::site::Entity as Site;
pub use super::tag::Entity as Tag;
pub use super::user_preference::Entity as UserPreference;
pub use super::virtual_machine::Entity as VirtualMachine;
pub use super::vm_interface::Entity as VmInterface;
pub use super::webhook::Entity as Webhook;
