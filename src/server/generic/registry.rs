//! Type-erased dispatch from `{app}/{type}` path segments to the generic
//! operations of a registered object type.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, IntoActiveModel};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::api::{BulkRenameRequest, DetailDto, ListDto, MutationDto, RenameDto};
use crate::server::error::Error;
use crate::server::generic::children::ChildCollection;
use crate::server::generic::views::Views;
use crate::server::generic::{ListParams, ObjectType};
use crate::server::model::principal::Principal;

/// The generic view set of one registered type, erased for dispatch.
#[async_trait]
pub trait AnyObjectView: Send + Sync {
    fn app(&self) -> &'static str;
    fn name(&self) -> &'static str;

    async fn list(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<ListDto, Error>;

    async fn detail(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        id: i32,
    ) -> Result<DetailDto, Error>;

    async fn create(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error>;

    async fn update(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        id: i32,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error>;

    async fn delete(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        id: i32,
    ) -> Result<MutationDto, Error>;

    async fn bulk_import(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        rows: Vec<Map<String, Value>>,
    ) -> Result<MutationDto, Error>;

    async fn bulk_edit(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        ids: Vec<i32>,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error>;

    async fn bulk_delete(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        ids: Vec<i32>,
    ) -> Result<MutationDto, Error>;

    async fn bulk_rename(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        request: BulkRenameRequest,
    ) -> Result<RenameDto, Error>;
}

/// Zero-sized bridge from the erased interface to `Views<T>`.
pub struct ViewHandle<T: ObjectType> {
    object_type: PhantomData<fn() -> T>,
}

impl<T: ObjectType> ViewHandle<T> {
    pub fn new() -> Self {
        Self {
            object_type: PhantomData,
        }
    }
}

impl<T: ObjectType> Default for ViewHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> AnyObjectView for ViewHandle<T>
where
    T: ObjectType,
    <T::Entity as EntityTrait>::Model:
        Serialize + IntoActiveModel<T::ActiveModel> + Send + Sync,
{
    fn app(&self) -> &'static str {
        T::APP
    }

    fn name(&self) -> &'static str {
        T::NAME
    }

    async fn list(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        params: &ListParams,
    ) -> Result<ListDto, Error> {
        Views::<T>::new(db).list(principal, params).await
    }

    async fn detail(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        id: i32,
    ) -> Result<DetailDto, Error> {
        Views::<T>::new(db).detail(principal, id).await
    }

    async fn create(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error> {
        Views::<T>::new(db).create(principal, input).await
    }

    async fn update(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        id: i32,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error> {
        Views::<T>::new(db).update(principal, id, input).await
    }

    async fn delete(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        id: i32,
    ) -> Result<MutationDto, Error> {
        Views::<T>::new(db).delete(principal, id).await
    }

    async fn bulk_import(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        rows: Vec<Map<String, Value>>,
    ) -> Result<MutationDto, Error> {
        Views::<T>::new(db).bulk_import(principal, rows).await
    }

    async fn bulk_edit(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        ids: Vec<i32>,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error> {
        Views::<T>::new(db).bulk_edit(principal, &ids, input).await
    }

    async fn bulk_delete(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        ids: Vec<i32>,
    ) -> Result<MutationDto, Error> {
        Views::<T>::new(db).bulk_delete(principal, &ids).await
    }

    async fn bulk_rename(
        &self,
        db: &DatabaseConnection,
        principal: &Principal,
        request: BulkRenameRequest,
    ) -> Result<RenameDto, Error> {
        Views::<T>::new(db).bulk_rename(principal, &request).await
    }
}

/// All registered object types and child collections, keyed by their URL
/// path segments.
#[derive(Default)]
pub struct ViewRegistry {
    views: HashMap<(String, String), Arc<dyn AnyObjectView>>,
    children: Vec<ChildCollection>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self)
    where
        T: ObjectType,
        <T::Entity as EntityTrait>::Model:
            Serialize + IntoActiveModel<T::ActiveModel> + Send + Sync,
    {
        self.views.insert(
            (T::APP.to_string(), T::NAME.to_string()),
            Arc::new(ViewHandle::<T>::new()),
        );
    }

    pub fn register_children(&mut self, collection: ChildCollection) {
        self.children.push(collection);
    }

    pub fn view(&self, app: &str, name: &str) -> Result<&Arc<dyn AnyObjectView>, Error> {
        self.views
            .get(&(app.to_string(), name.to_string()))
            .ok_or_else(|| Error::UnknownType {
                app: app.to_string(),
                name: name.to_string(),
            })
    }

    pub fn child(&self, app: &str, name: &str, tab: &str) -> Result<&ChildCollection, Error> {
        self.children
            .iter()
            .find(|collection| {
                collection.parent_app == app
                    && collection.parent_name == name
                    && collection.tab == tab
            })
            .ok_or_else(|| Error::UnknownChildCollection {
                object_type: format!("{app}.{name}"),
                tab: tab.to_string(),
            })
    }
}
