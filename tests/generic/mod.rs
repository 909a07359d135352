mod bulk_delete;
mod bulk_edit;
mod bulk_import;
mod bulk_rename;
mod children;
mod delete;
mod detail;
mod edit;
mod list;
