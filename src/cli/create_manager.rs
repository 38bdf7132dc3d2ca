use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::UserCoordinator;
use crate::types::internal::context::RequestContext;

/// Create a manager account from the command line
pub async fn create_manager(
    app_data: Arc<AppData>,
    user_id: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("create-manager");
    let coordinator = UserCoordinator::new(app_data);

    let uid = coordinator.create_manager(&ctx, user_id, password).await?;

    println!("Manager '{}' created with uid {}", user_id, uid);
    Ok(())
}
