//! The generic operations every object type is served through.
//!
//! [`Views`] is stateless per request: it borrows the connection, takes the
//! acting principal explicitly, and resolves everything else from the
//! [`ObjectType`] configuration. Every mutating operation runs inside one
//! transaction — commit on success, explicit rollback on any error — and
//! writes its object-change rows before committing.

use std::marker::PhantomData;
use std::str::FromStr;

use chrono::Utc;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IntoActiveModel, Iterable, PrimaryKeyToColumn, QueryFilter, QueryOrder, Select,
    TransactionTrait,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::api::{
    BulkRenameRequest, DetailDto, ListDto, MutationDto, NoticeDto, RenameDto, RenameEntryDto,
};
use crate::server::data::changelog::ObjectChangeRepository;
use crate::server::data::preference::PreferenceRepository;
use crate::server::error::{Error, ValidationErrors};
use crate::server::generic::{ListParams, ObjectType};
use crate::server::model::principal::Principal;
use crate::server::query::{annotate, embed};
use crate::server::table::table::{parse_sort, RenderContext, Table, DEFAULT_PER_PAGE};

/// First declared primary-key column of an entity.
pub(crate) fn pk_column<E: EntityTrait>() -> Result<E::Column, Error> {
    E::PrimaryKey::iter()
        .next()
        .map(|key| key.into_column())
        .ok_or_else(|| Error::Db(DbErr::Custom("entity has no primary key".to_string())))
}

pub struct Views<'a, T: ObjectType> {
    db: &'a DatabaseConnection,
    object_type: PhantomData<fn() -> T>,
}

impl<'a, T: ObjectType> Views<'a, T> {
    /// Creates a new instance of [`Views`] for one object type.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            object_type: PhantomData,
        }
    }

    fn require(&self, principal: &Principal, verb: &str) -> Result<(), Error> {
        let permission = T::permission(verb);
        if principal.has_permission(&permission) {
            Ok(())
        } else {
            Err(Error::Forbidden { permission })
        }
    }

    fn allow(action: &'static str) -> Result<(), Error> {
        if T::actions().contains(&action) {
            Ok(())
        } else {
            Err(Error::UnsupportedAction {
                object_type: T::type_key(),
                action,
            })
        }
    }

    /// Base query narrowed to records the principal may see. Object-level
    /// constraints AND-compose with everything the caller adds later.
    fn restricted(&self, principal: &Principal) -> Result<Select<T::Entity>, Error> {
        let mut select = T::base_query();

        if let Some(ids) = principal.constraint(&T::type_key()) {
            select = select.filter(pk_column::<T::Entity>()?.is_in(ids.to_vec()));
        }

        Ok(select)
    }

    fn not_found(id: i32) -> Error {
        Error::NotFound {
            object_type: T::type_key(),
            id,
        }
    }

    /// The List operation.
    pub async fn list(&self, principal: &Principal, params: &ListParams) -> Result<ListDto, Error> {
        self.list_with(principal, params, None, None).await
    }

    /// List, optionally scoped by an extra condition (child collections)
    /// and tagged with an active tab for the surrounding layout.
    pub async fn list_with(
        &self,
        principal: &Principal,
        params: &ListParams,
        extra: Option<Condition>,
        active_tab: Option<&str>,
    ) -> Result<ListDto, Error> {
        Self::allow("list")?;
        self.require(principal, "view")?;

        let condition = T::filters()
            .validate(&params.filters)
            .map_err(Error::Validation)?;

        let mut select = self.restricted(principal)?.filter(condition);

        if let Some(term) = params.q.as_deref().filter(|term| !term.is_empty()) {
            match T::search(term) {
                Some(search) => select = select.filter(search),
                None => {
                    let mut errors = ValidationErrors::new();
                    errors.add("q", "Search is not supported for this type.");
                    return Err(Error::Validation(errors));
                }
            }
        }

        if let Some(extra) = extra {
            select = select.filter(extra);
        }

        let mut records = select
            .order_by_asc(pk_column::<T::Entity>()?)
            .into_json()
            .all(self.db)
            .await?;

        for annotation in T::annotations() {
            let counts = (annotation.fetch)(self.db).await?;
            annotate::merge(&mut records, annotation.name, &counts);
        }
        embed::attach(self.db, &mut records, T::embeds()).await?;

        let stored = PreferenceRepository::new(self.db)
            .get(&principal.username, T::table().name)
            .await?;
        let stored_columns = stored
            .as_ref()
            .and_then(|p| PreferenceRepository::string_list(p.columns.as_ref()));
        let stored_sort = stored
            .as_ref()
            .and_then(|p| PreferenceRepository::string_list(p.sort.as_ref()));
        let stored_per_page = stored.as_ref().and_then(|p| p.per_page);

        let mut table = Table::new(
            T::table(),
            records,
            params.columns.as_deref(),
            stored_columns.as_deref(),
        )
        .map_err(Error::Validation)?;

        let sort_tokens = if params.sort.is_empty() {
            stored_sort.unwrap_or_default()
        } else {
            params.sort.clone()
        };
        table.sort(&parse_sort(&sort_tokens));

        let per_page = params
            .per_page
            .or(stored_per_page.map(|value| value as u64))
            .unwrap_or(DEFAULT_PER_PAGE);
        let page = table.paginate(params.page.unwrap_or(1), per_page);

        let context = RenderContext {
            principal,
            object_path: T::object_path(),
            change_permission: T::permission("change"),
            delete_permission: T::permission("delete"),
        };

        Ok(ListDto {
            object_type: T::type_key(),
            table: table.render(&context),
            page,
            active_tab: active_tab.map(str::to_string),
        })
    }

    /// The Detail operation.
    ///
    /// A missing `view` permission is Forbidden; a record hidden by an
    /// object-level constraint is NotFound, exactly like a missing record,
    /// so constrained visibility never confirms existence.
    pub async fn detail(&self, principal: &Principal, id: i32) -> Result<DetailDto, Error> {
        Self::allow("detail")?;
        self.require(principal, "view")?;

        let record = self
            .restricted(principal)?
            .filter(pk_column::<T::Entity>()?.eq(id))
            .into_json()
            .one(self.db)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        let mut records = vec![record];
        for annotation in T::annotations() {
            let counts = (annotation.fetch)(self.db).await?;
            annotate::merge(&mut records, annotation.name, &counts);
        }
        embed::attach(self.db, &mut records, T::embeds()).await?;

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| Self::not_found(id))?;

        Ok(DetailDto {
            object_type: T::type_key(),
            id,
            record,
        })
    }
}

impl<'a, T: ObjectType> Views<'a, T>
where
    <T::Entity as EntityTrait>::Model:
        Serialize + IntoActiveModel<T::ActiveModel> + Send + Sync,
{
    /// The Edit operation, create flavor.
    pub async fn create(
        &self,
        principal: &Principal,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error> {
        Self::allow("create")?;
        self.require(principal, "add")?;

        let txn = self.db.begin().await?;
        let result = Self::insert_one(&txn, principal, &input).await;

        match result {
            Ok(record) => {
                txn.commit().await?;

                let id = record_id(&record);
                let repr = T::repr(&record);
                Ok(MutationDto {
                    object_type: T::type_key(),
                    id: Some(id),
                    count: 1,
                    notice: NoticeDto::success(format!("Created {} {}", T::VERBOSE_NAME, repr)),
                })
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// The Edit operation, update flavor.
    pub async fn update(
        &self,
        principal: &Principal,
        id: i32,
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error> {
        Self::allow("update")?;
        self.require(principal, "change")?;

        let txn = self.db.begin().await?;
        let result = self.update_one(&txn, principal, id, &input).await;

        match result {
            Ok(record) => {
                txn.commit().await?;

                let repr = T::repr(&record);
                Ok(MutationDto {
                    object_type: T::type_key(),
                    id: Some(id),
                    count: 1,
                    notice: NoticeDto::success(format!("Updated {} {}", T::VERBOSE_NAME, repr)),
                })
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// The Delete operation. A record still referenced through a protected
    /// relation is reported with its blockers; nothing is deleted.
    pub async fn delete(&self, principal: &Principal, id: i32) -> Result<MutationDto, Error> {
        Self::allow("delete")?;
        self.require(principal, "delete")?;

        let txn = self.db.begin().await?;
        let result = self.delete_one(&txn, principal, id).await;

        match result {
            Ok(record) => {
                txn.commit().await?;

                let repr = T::repr(&record);
                Ok(MutationDto {
                    object_type: T::type_key(),
                    id: Some(id),
                    count: 1,
                    notice: NoticeDto::success(format!("Deleted {} {}", T::VERBOSE_NAME, repr)),
                })
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// The BulkImport operation over already-parsed rows.
    ///
    /// The batch is one all-or-nothing transaction; the first failing row
    /// aborts it, reported under its row index.
    pub async fn bulk_import(
        &self,
        principal: &Principal,
        rows: Vec<Map<String, Value>>,
    ) -> Result<MutationDto, Error> {
        Self::allow("bulk_import")?;
        self.require(principal, "add")?;

        let txn = self.db.begin().await?;
        let mut imported = 0_u64;
        let mut failure = None;

        for (index, row) in rows.iter().enumerate() {
            match Self::insert_one(&txn, principal, row).await {
                Ok(_) => imported += 1,
                Err(Error::Validation(errors)) => {
                    failure = Some(Error::Validation(prefix_row(index, errors)));
                    break;
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        match failure {
            None => {
                txn.commit().await?;

                Ok(MutationDto {
                    object_type: T::type_key(),
                    id: None,
                    count: imported,
                    notice: NoticeDto::success(format!(
                        "Imported {imported} {}",
                        T::VERBOSE_NAME_PLURAL
                    )),
                })
            }
            Some(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// The BulkEdit operation: one field map applied to every selected
    /// record in one transaction. Any failure leaves all records unchanged.
    pub async fn bulk_edit(
        &self,
        principal: &Principal,
        ids: &[i32],
        input: Map<String, Value>,
    ) -> Result<MutationDto, Error> {
        Self::allow("bulk_edit")?;
        self.require(principal, "change")?;

        let txn = self.db.begin().await?;
        let mut result = Ok(());

        for id in ids {
            if let Err(err) = self.update_one(&txn, principal, *id, &input).await {
                result = Err(err);
                break;
            }
        }

        match result {
            Ok(()) => {
                txn.commit().await?;

                Ok(MutationDto {
                    object_type: T::type_key(),
                    id: None,
                    count: ids.len() as u64,
                    notice: NoticeDto::success(format!(
                        "Updated {} {}",
                        ids.len(),
                        T::VERBOSE_NAME_PLURAL
                    )),
                })
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// The BulkDelete operation: all-or-nothing over the selection; the
    /// first protected record aborts the whole transaction.
    pub async fn bulk_delete(
        &self,
        principal: &Principal,
        ids: &[i32],
    ) -> Result<MutationDto, Error> {
        Self::allow("bulk_delete")?;
        self.require(principal, "delete")?;

        let txn = self.db.begin().await?;
        let mut result = Ok(());

        for id in ids {
            if let Err(err) = self.delete_one(&txn, principal, *id).await {
                result = Err(err);
                break;
            }
        }

        match result {
            Ok(()) => {
                txn.commit().await?;

                Ok(MutationDto {
                    object_type: T::type_key(),
                    id: None,
                    count: ids.len() as u64,
                    notice: NoticeDto::success(format!(
                        "Deleted {} {}",
                        ids.len(),
                        T::VERBOSE_NAME_PLURAL
                    )),
                })
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// The BulkRename operation: regex find/replace over the name field,
    /// previewed without writing unless `commit` is set.
    pub async fn bulk_rename(
        &self,
        principal: &Principal,
        request: &BulkRenameRequest,
    ) -> Result<RenameDto, Error> {
        Self::allow("bulk_rename")?;
        self.require(principal, "change")?;

        let name_field = T::name_field().ok_or_else(|| Error::UnsupportedAction {
            object_type: T::type_key(),
            action: "bulk_rename",
        })?;

        let pattern = Regex::new(&request.pattern).map_err(|err| {
            let mut errors = ValidationErrors::new();
            errors.add("pattern", format!("Invalid pattern: {err}"));
            Error::Validation(errors)
        })?;

        let records = self
            .restricted(principal)?
            .filter(pk_column::<T::Entity>()?.is_in(request.ids.clone()))
            .order_by_asc(pk_column::<T::Entity>()?)
            .into_json()
            .all(self.db)
            .await?;

        let mut entries = Vec::with_capacity(request.ids.len());
        for id in &request.ids {
            let record = records
                .iter()
                .find(|record| record_id(record) == *id)
                .ok_or_else(|| Self::not_found(*id))?;
            let current = record
                .get(name_field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let new_name = pattern
                .replace_all(&current, request.replacement.as_str())
                .into_owned();

            entries.push(RenameEntryDto {
                id: *id,
                current_name: current,
                new_name,
            });
        }

        if !request.commit {
            return Ok(RenameDto {
                object_type: T::type_key(),
                committed: false,
                entries,
                notice: None,
            });
        }

        let txn = self.db.begin().await?;
        let mut result = Ok(());

        for entry in &entries {
            let mut input = Map::new();
            input.insert(
                name_field.to_string(),
                Value::String(entry.new_name.clone()),
            );

            if let Err(err) = self.update_one(&txn, principal, entry.id, &input).await {
                result = Err(err);
                break;
            }
        }

        match result {
            Ok(()) => {
                txn.commit().await?;

                let count = entries.len();
                Ok(RenameDto {
                    object_type: T::type_key(),
                    committed: true,
                    entries,
                    notice: Some(NoticeDto::success(format!(
                        "Renamed {count} {}",
                        T::VERBOSE_NAME_PLURAL
                    ))),
                })
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn insert_one(
        txn: &DatabaseTransaction,
        principal: &Principal,
        input: &Map<String, Value>,
    ) -> Result<Value, Error> {
        T::validate(txn, input, None).await?;

        let mut model = <T::ActiveModel as Default>::default();
        T::apply(&mut model, input).map_err(Error::Validation)?;
        stamp(&mut model, true);

        let model = model.insert(txn).await?;
        let record = to_record(&model)?;

        ObjectChangeRepository::new(txn)
            .record(
                principal,
                "create",
                T::APP,
                T::NAME,
                record_id(&record),
                T::repr(&record),
                Some(record.clone()),
            )
            .await?;

        Ok(record)
    }

    async fn update_one(
        &self,
        txn: &DatabaseTransaction,
        principal: &Principal,
        id: i32,
        input: &Map<String, Value>,
    ) -> Result<Value, Error> {
        let existing = self
            .restricted(principal)?
            .filter(pk_column::<T::Entity>()?.eq(id))
            .one(txn)
            .await?
            .ok_or_else(|| Self::not_found(id))?;

        T::validate(txn, input, Some(id)).await?;

        let mut model = existing.into_active_model();
        T::apply(&mut model, input).map_err(Error::Validation)?;
        stamp(&mut model, false);

        let model = model.update(txn).await?;
        let record = to_record(&model)?;

        ObjectChangeRepository::new(txn)
            .record(
                principal,
                "update",
                T::APP,
                T::NAME,
                id,
                T::repr(&record),
                Some(record.clone()),
            )
            .await?;

        Ok(record)
    }

    async fn delete_one(
        &self,
        txn: &DatabaseTransaction,
        principal: &Principal,
        id: i32,
    ) -> Result<Value, Error> {
        let existing = self
            .restricted(principal)?
            .filter(pk_column::<T::Entity>()?.eq(id))
            .one(txn)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        let record = to_record(&existing)?;

        let dependents = T::dependents(txn, id).await?;
        if !dependents.is_empty() {
            return Err(Error::Protected {
                object_type: T::type_key(),
                id,
                dependents,
            });
        }

        T::Entity::delete_many()
            .filter(pk_column::<T::Entity>()?.eq(id))
            .exec(txn)
            .await?;

        ObjectChangeRepository::new(txn)
            .record(
                principal,
                "delete",
                T::APP,
                T::NAME,
                id,
                T::repr(&record),
                Some(record.clone()),
            )
            .await?;

        Ok(record)
    }
}

/// Sets `created_at`/`updated_at` where the entity declares them.
fn stamp<A>(model: &mut A, create: bool)
where
    A: ActiveModelTrait,
{
    let now = Utc::now().naive_utc();

    if create {
        if let Ok(column) = <<A::Entity as EntityTrait>::Column as FromStr>::from_str("created_at")
        {
            model.set(column, now.into());
        }
    }
    if let Ok(column) = <<A::Entity as EntityTrait>::Column as FromStr>::from_str("updated_at") {
        model.set(column, now.into());
    }
}

fn to_record<M: Serialize>(model: &M) -> Result<Value, Error> {
    serde_json::to_value(model).map_err(|err| Error::Db(DbErr::Json(err.to_string())))
}

fn record_id(record: &Value) -> i32 {
    record
        .get("id")
        .and_then(Value::as_i64)
        .unwrap_or_default() as i32
}

fn prefix_row(index: usize, errors: ValidationErrors) -> ValidationErrors {
    let mut prefixed = ValidationErrors::new();
    for (field, messages) in errors.errors {
        for message in messages {
            prefixed.add(format!("rows[{index}].{field}"), message);
        }
    }
    prefixed
}
