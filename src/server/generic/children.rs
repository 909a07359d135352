//! Child-collection views: a List scoped to records whose relation field
//! points at one parent record, tagged with the active tab the surrounding
//! layout should highlight.

use futures::future::BoxFuture;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter};

use crate::model::api::ListDto;
use crate::server::error::Error;
use crate::server::generic::views::{pk_column, Views};
use crate::server::generic::{ListParams, ObjectType};
use crate::server::model::principal::Principal;

/// Builds the condition scoping child records to one parent key.
pub type ParentFilter = fn(i32) -> Condition;

type ChildHandler = Box<
    dyn for<'a> Fn(
            &'a DatabaseConnection,
            &'a Principal,
            i32,
            &'a ListParams,
        ) -> BoxFuture<'a, Result<ListDto, Error>>
        + Send
        + Sync,
>;

/// One registered child tab of a parent object type.
pub struct ChildCollection {
    pub parent_app: &'static str,
    pub parent_name: &'static str,
    pub tab: &'static str,
    handler: ChildHandler,
}

impl ChildCollection {
    /// Declares that `P` detail pages carry a `tab` listing `C` records
    /// scoped by `parent_filter`.
    pub fn new<P, C>(tab: &'static str, parent_filter: ParentFilter) -> Self
    where
        P: ObjectType,
        C: ObjectType,
    {
        let handler: ChildHandler = Box::new(move |db, principal, parent_id, params| {
            Box::pin(async move {
                let parent = P::base_query()
                    .filter(pk_column::<P::Entity>()?.eq(parent_id))
                    .into_json()
                    .one(db)
                    .await?;

                if parent.is_none() {
                    return Err(Error::NotFound {
                        object_type: P::type_key(),
                        id: parent_id,
                    });
                }

                Views::<C>::new(db)
                    .list_with(principal, params, Some(parent_filter(parent_id)), Some(tab))
                    .await
            })
        });

        Self {
            parent_app: P::APP,
            parent_name: P::NAME,
            tab,
            handler,
        }
    }

    pub async fn list(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        parent_id: i32,
        params: &ListParams,
    ) -> Result<ListDto, Error> {
        (self.handler)(db, principal, parent_id, params).await
    }
}
