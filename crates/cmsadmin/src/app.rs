//! Top-level coordinator: one session, three editors and the dashboard.

use std::sync::Arc;

use log::{info, warn};
use secrecy::SecretString;
use tokio::sync::broadcast;

use crate::api::{ApiClient, HttpTransport};
use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::editor::RecordEditor;
use crate::error::{AdminError, EditorError, Result};
use crate::models::{CaseStudy, DashboardStats, Job, Product, Record, RecordKind};
use crate::session::Session;
use crate::workflow::{ImageSlots, ProductSaveWorkflow, SaveProgressBroadcaster, SaveProgressEvent};

/// Application state shared by every front end.
pub struct AdminApp {
    client: ApiClient,
    settings: Settings,
    session: Option<Session>,
    pub jobs: RecordEditor<Job>,
    pub products: RecordEditor<Product>,
    pub cases: RecordEditor<CaseStudy>,
    pub dashboard: Dashboard,
    product_workflow: ProductSaveWorkflow,
    progress: SaveProgressBroadcaster,
}

fn require_session(session: &Option<Session>) -> Result<&Session> {
    session.as_ref().ok_or(AdminError::NotLoggedIn)
}

impl AdminApp {
    pub fn new(client: ApiClient, settings: Settings) -> Self {
        let progress = SaveProgressBroadcaster::default();
        Self {
            client,
            settings,
            session: None,
            jobs: RecordEditor::new(),
            products: RecordEditor::new(),
            cases: RecordEditor::new(),
            dashboard: Dashboard::new(),
            product_workflow: ProductSaveWorkflow::new(progress.clone()),
            progress,
        }
    }

    /// Builds the app on an HTTP transport for `settings.endpoint`.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let transport = HttpTransport::new(&settings)?;
        let client = ApiClient::new(Arc::new(transport));
        Ok(Self::new(client, settings))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Result<&Session> {
        require_session(&self.session)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub async fn login(&mut self, password: &SecretString) -> Result<&Session> {
        let session = self.client.login(password).await?;
        Ok(self.session.insert(session))
    }

    /// Tells the server and drops the session. The local session is dropped
    /// even if the server call fails.
    pub async fn logout(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        self.client.logout(&session).await?;
        Ok(())
    }

    /// Clears a stuck edit lock on the server.
    pub async fn force_clear_lock(&self, password: &SecretString) -> Result<String> {
        Ok(self.client.force_clear_lock(password).await?)
    }

    /// Reloads every collection and the dashboard in one request.
    ///
    /// Each editor's list is replaced wholesale and its first record selected.
    /// Stats are derived locally when the server sends none.
    pub async fn refresh_all(&mut self) -> Result<()> {
        let data = self.client.fetch_all().await?;
        let stats = data.stats.unwrap_or_else(|| {
            DashboardStats::from_records(&data.jobs, &data.products, &data.cases)
        });
        info!(
            "Refreshed: {} jobs, {} products, {} cases",
            data.jobs.len(),
            data.products.len(),
            data.cases.len()
        );

        self.jobs.replace_all(data.jobs);
        self.products.replace_all(data.products);
        self.cases.replace_all(data.cases);
        self.dashboard.update(stats);
        Ok(())
    }

    /// Reloads the job list alone.
    pub async fn refresh_jobs(&mut self) -> Result<()> {
        let jobs = self.client.fetch_jobs().await?;
        self.jobs.replace_all(jobs);
        Ok(())
    }

    pub async fn save_jobs(&mut self) -> Result<String> {
        let session = require_session(&self.session)?;
        let outcome = self.jobs.save(&self.client, session).await;
        report(&self.progress, Job::KIND, &outcome);
        Ok(outcome?)
    }

    pub async fn save_cases(&mut self) -> Result<String> {
        let session = require_session(&self.session)?;
        let outcome = self.cases.save(&self.client, session).await;
        report(&self.progress, CaseStudy::KIND, &outcome);
        Ok(outcome?)
    }

    /// Uploads the pending images of the selected product, then saves the product list.
    pub async fn save_selected_product(&mut self) -> Result<String> {
        let session = require_session(&self.session)?;
        let message = self
            .product_workflow
            .run(&mut self.products, &self.client, session)
            .await?;
        Ok(message)
    }

    /// Appends a placeholder product in the configured initial category.
    pub fn add_product(&mut self) -> usize {
        let category = self.settings.products.initial_category();
        self.products.add_with(|product| product.category = category)
    }

    /// Local image files waiting to be uploaded with the next product save.
    pub fn image_slots_mut(&mut self) -> &mut ImageSlots {
        self.product_workflow.slots_mut()
    }

    pub fn subscribe_progress(&self) -> broadcast::Receiver<SaveProgressEvent> {
        self.progress.subscribe()
    }
}

fn report(
    progress: &SaveProgressBroadcaster,
    kind: RecordKind,
    outcome: &std::result::Result<String, EditorError>,
) {
    match outcome {
        Ok(message) => progress.send(SaveProgressEvent::completed(kind, message.clone())),
        Err(e) => {
            warn!("Saving {} failed: {}", kind, e);
            progress.send(SaveProgressEvent::failed(kind, e.to_string()));
        }
    }
}
