//! Asset management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    lifecycle::{self, UniqueKey},
    models::{
        asset::{AssetDetails, CreateAsset, NewAsset, UpdateAsset},
        assignment::{AssignmentDetails, AssignmentQuery},
        enums::AssetStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AssetDetails>> {
        self.repository.assets.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<AssetDetails> {
        self.repository.assets.get_details(id).await
    }

    /// Assignment history of an asset, newest first
    pub async fn history(&self, id: i32) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.assets.get_by_id(id).await?;
        self.repository
            .assignments
            .list(&AssignmentQuery {
                asset_id: Some(id),
                ..Default::default()
            })
            .await
    }

    /// Register a new asset; its status is derived from its condition
    pub async fn create(&self, data: &CreateAsset) -> AppResult<AssetDetails> {
        let today = Utc::now().date_naive();
        let serial_number = lifecycle::ensure_serial_number_present(&data.serial_number)?;
        let purchase_date = data.purchase_date.unwrap_or(today);
        lifecycle::validate_asset_dates(purchase_date, data.warranty_expiry_date, today)?;

        let condition = data.condition.unwrap_or_default();
        let new_asset = NewAsset {
            name: data.name.clone(),
            asset_type: data.asset_type.clone(),
            make_model: data.make_model.clone().unwrap_or_default(),
            serial_number,
            purchase_date,
            warranty_expiry_date: data.warranty_expiry_date,
            condition,
            status: lifecycle::derive_status_on_create(condition),
            is_spare: data.is_spare.unwrap_or(false),
            specifications: data.specifications.clone().unwrap_or_default(),
        };

        let mut tx = self.repository.begin().await?;

        let taken = self
            .repository
            .assets
            .serial_number_exists(&mut tx, &new_asset.serial_number, None)
            .await?;
        lifecycle::ensure_unique(UniqueKey::SerialNumber, &new_asset.serial_number, taken)?;

        let asset = self.repository.assets.create(&mut tx, &new_asset).await?;
        tx.commit().await?;

        tracing::info!(asset_id = asset.id, status = %asset.status, "Asset created");
        Ok(AssetDetails { asset, employee: None })
    }

    /// Edit an asset; status and holder are re-synchronized with the new condition
    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<AssetDetails> {
        let today = Utc::now().date_naive();
        let mut tx = self.repository.begin().await?;

        let mut asset = self
            .repository
            .assets
            .lock(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;
        let previous_holder = asset.employee_id;

        data.apply_to(&mut asset);
        asset.serial_number = lifecycle::ensure_serial_number_present(&asset.serial_number)?;
        lifecycle::validate_asset_dates(asset.purchase_date, asset.warranty_expiry_date, today)?;

        let taken = self
            .repository
            .assets
            .serial_number_exists(&mut tx, &asset.serial_number, Some(id))
            .await?;
        lifecycle::ensure_unique(UniqueKey::SerialNumber, &asset.serial_number, taken)?;

        let open_holder = self
            .repository
            .assignments
            .lock_open_for_asset(&mut tx, id)
            .await?
            .map(|record| record.employee_id);
        lifecycle::on_update(&asset, asset.condition, open_holder).apply_to(&mut asset);

        if previous_holder.is_some() && asset.status != AssetStatus::Assigned {
            tracing::info!(
                asset_id = id,
                employee_id = previous_holder,
                status = %asset.status,
                "Condition change released asset from its holder"
            );
        }

        self.repository.assets.update(&mut tx, &asset).await?;
        tx.commit().await?;

        self.repository.assets.get_details(id).await
    }

    /// Delete an asset that is neither assigned nor on an open record
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        let asset = self
            .repository
            .assets
            .lock(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))?;
        lifecycle::ensure_asset_deletable(&asset)?;
        let open = self.repository.assignments.lock_open_for_asset(&mut tx, id).await?;
        lifecycle::ensure_no_open_assignment(open.as_ref())?;

        self.repository.assets.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(asset_id = id, "Asset deleted");
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.assets.count().await
    }
}
