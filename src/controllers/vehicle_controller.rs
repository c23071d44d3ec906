use crate::dto::vehicle_dto::{CheckinRequest, CheckoutRequest, PageQuery, RefreshResponse, VehicleResponse};
use crate::dto::ApiResponse;
use crate::store::{Page, VehicleStore};
use crate::utils::errors::AppResult;

pub struct VehicleController {
    store: VehicleStore,
    page_size: usize,
}

impl VehicleController {
    pub fn new(store: VehicleStore, page_size: usize) -> Self {
        Self { store, page_size }
    }

    pub async fn list(&self, query: PageQuery) -> AppResult<Page<VehicleResponse>> {
        let page = self
            .store
            .page(query.page(), query.per_page_or(self.page_size))
            .await;
        Ok(page.map(VehicleResponse::from))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VehicleResponse> {
        let vehicle = self.store.get_vehicle(id).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn refresh(&self) -> AppResult<ApiResponse<RefreshResponse>> {
        let count = self.store.fetch_vehicles().await?;

        Ok(ApiResponse::success_with_message(
            RefreshResponse {
                count,
                policy: self.store.policy().to_string(),
            },
            format!("Catálogo actualizado: {} vehículos", count),
        ))
    }

    pub async fn checkout(
        &self,
        id: i64,
        request: CheckoutRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        let details = request.into_details()?;
        let checkout_type = details.checkout_type;
        let vehicle = self.store.checkout_vehicle(id, details).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            format!("Vehículo entregado exitosamente ({})", checkout_type.label()),
        ))
    }

    pub async fn checkin(
        &self,
        id: i64,
        request: CheckinRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        let details = request.into_details()?;
        let vehicle = self.store.checkin_vehicle(id, details).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo devuelto exitosamente".to_string(),
        ))
    }
}
