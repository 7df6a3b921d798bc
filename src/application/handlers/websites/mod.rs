//! Website (project) handlers.
//!
//! ## Commands
//! - Creating, deleting websites
//! - Adding pages, applying AI iterations to pages
//!
//! ## Queries
//! - Listing and fetching websites
//! - Exporting a website in a download format

mod add_page;
mod create_website;
mod delete_website;
mod export_website;
mod get_website;
mod update_page;

pub use add_page::{AddPageCommand, AddPageHandler};
pub use create_website::{CreateWebsiteCommand, CreateWebsiteHandler};
pub use delete_website::{DeleteWebsiteCommand, DeleteWebsiteHandler};
pub use export_website::{ExportWebsiteHandler, ExportWebsiteQuery};
pub use get_website::{GetWebsiteHandler, GetWebsiteQuery, ListWebsitesHandler, ListWebsitesQuery};
pub use update_page::{UpdatePageCommand, UpdatePageHandler};

use crate::domain::foundation::{UserId, WebsiteId};
use crate::domain::website::{Website, WebsiteError};
use crate::ports::WebsiteRepository;

/// Load a website and check the caller owns it.
pub(crate) async fn load_owned(
    repository: &dyn WebsiteRepository,
    website_id: &WebsiteId,
    user_id: &UserId,
) -> Result<Website, WebsiteError> {
    let website = repository
        .find_by_id(website_id)
        .await?
        .ok_or_else(|| WebsiteError::not_found(*website_id))?;
    website.authorize(user_id)?;
    Ok(website)
}
