//! Shared axum state.
//!
//! Holds the port handles and builds application handlers on demand.

use std::sync::Arc;

use crate::application::handlers::analytics::{GetStatsHandler, RecordViewHandler, SubmitFormHandler};
use crate::application::handlers::billing::{
    CheckoutUrls, CreateCheckoutHandler, HandlePaymentWebhookHandler, PriceTable,
};
use crate::application::handlers::generation::{GenerateWebsiteHandler, GenerationSettings};
use crate::application::handlers::usage::{CheckExportHandler, GetUsageHandler, UsageQuota};
use crate::application::handlers::websites::{
    AddPageHandler, CreateWebsiteHandler, DeleteWebsiteHandler, ExportWebsiteHandler,
    GetWebsiteHandler, ListWebsitesHandler, UpdatePageHandler,
};
use crate::ports::{
    AIProvider, AnalyticsRepository, PaymentProvider, ProfileRepository, WebsiteRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub websites: Arc<dyn WebsiteRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    /// `None` when no AI key is configured; generation then fails per request.
    pub ai_provider: Option<Arc<dyn AIProvider>>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub generation: GenerationSettings,
    pub prices: PriceTable,
    pub checkout_urls: CheckoutUrls,
}

impl AppState {
    fn quota(&self) -> UsageQuota {
        UsageQuota::new(self.profiles.clone())
    }

    pub fn generate_website_handler(&self) -> GenerateWebsiteHandler {
        GenerateWebsiteHandler::new(
            self.ai_provider.clone(),
            self.quota(),
            self.generation.clone(),
        )
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.payment_provider.clone(), self.checkout_urls.clone())
    }

    pub fn payment_webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payment_provider.clone(),
            self.profiles.clone(),
            self.prices.clone(),
        )
    }

    pub fn get_usage_handler(&self) -> GetUsageHandler {
        GetUsageHandler::new(self.profiles.clone())
    }

    pub fn check_export_handler(&self) -> CheckExportHandler {
        CheckExportHandler::new(self.profiles.clone())
    }

    pub fn create_website_handler(&self) -> CreateWebsiteHandler {
        CreateWebsiteHandler::new(self.websites.clone(), self.quota())
    }

    pub fn get_website_handler(&self) -> GetWebsiteHandler {
        GetWebsiteHandler::new(self.websites.clone())
    }

    pub fn list_websites_handler(&self) -> ListWebsitesHandler {
        ListWebsitesHandler::new(self.websites.clone())
    }

    pub fn delete_website_handler(&self) -> DeleteWebsiteHandler {
        DeleteWebsiteHandler::new(self.websites.clone(), self.analytics.clone(), self.quota())
    }

    pub fn add_page_handler(&self) -> AddPageHandler {
        AddPageHandler::new(self.websites.clone(), self.quota())
    }

    pub fn update_page_handler(&self) -> UpdatePageHandler {
        UpdatePageHandler::new(self.websites.clone(), self.quota())
    }

    pub fn export_website_handler(&self) -> ExportWebsiteHandler {
        ExportWebsiteHandler::new(self.websites.clone(), self.quota())
    }

    pub fn record_view_handler(&self) -> RecordViewHandler {
        RecordViewHandler::new(self.websites.clone(), self.analytics.clone())
    }

    pub fn submit_form_handler(&self) -> SubmitFormHandler {
        SubmitFormHandler::new(self.websites.clone(), self.analytics.clone())
    }

    pub fn get_stats_handler(&self) -> GetStatsHandler {
        GetStatsHandler::new(self.websites.clone(), self.analytics.clone(), self.quota())
    }
}
