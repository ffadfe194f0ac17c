use std::sync::Arc;

use curator_service::CuratorService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CuratorService>,
}
impl AppState {
	pub fn new(config: curator_config::Config) -> color_eyre::Result<Self> {
		let service = CuratorService::open(config)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: CuratorService) -> Self {
		Self { service: Arc::new(service) }
	}
}
