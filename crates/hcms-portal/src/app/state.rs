use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hcms_application::view::{Action, PageView};
use hcms_application::{Field, PageContext, PageController, UiEvent, mount};
use hcms_core::config::PortalConfig;
use hcms_core::route::{Location, Page};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// Upper bound on redirects followed after one event.
const MAX_REDIRECTS: usize = 8;

/// The mounted page and everything needed to replace it.
pub struct AppState {
    ctx: PageContext,
    config: PortalConfig,
    navigations: UnboundedReceiver<Location>,
    current: Arc<dyn PageController>,
    /// Debounced search input not yet sent.
    pending_filter: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(ctx: PageContext, config: PortalConfig, navigations: UnboundedReceiver<Location>) -> Self {
        let current = mount(&Location::new(Page::Landing), ctx.clone());
        Self {
            ctx,
            config,
            navigations,
            current,
            pending_filter: None,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn page(&self) -> Page {
        self.current.page()
    }

    /// Mounts and loads the page at `location`, then follows any redirect
    /// the load caused.
    pub async fn open(&mut self, location: Location) -> Result<()> {
        self.mount(location).await?;
        self.settle().await
    }

    async fn mount(&mut self, location: Location) -> Result<()> {
        if let Some(pending) = self.pending_filter.take() {
            pending.abort();
        }
        tracing::info!(page = %location.page, "Mounting page");
        self.current = mount(&location, self.ctx.clone());
        self.current.load().await?;
        Ok(())
    }

    /// Applies queued navigations until none remain.
    pub async fn settle(&mut self) -> Result<()> {
        let mut hops = 0;
        while let Ok(location) = self.navigations.try_recv() {
            hops += 1;
            if hops > MAX_REDIRECTS {
                tracing::error!(to = %location.page, "Redirect loop, staying on current page");
                while self.navigations.try_recv().is_ok() {}
                break;
            }
            self.mount(location).await?;
        }
        Ok(())
    }

    /// Sends `event` to the mounted page. Search input is debounced when
    /// configured; a newer keystroke cancels the pending one. Returns
    /// `false` when the event was deferred.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<bool> {
        match (&event, self.config.filter_debounce()) {
            (
                UiEvent::Input {
                    field: Field::Search,
                    ..
                },
                Some(delay),
            ) => {
                self.debounce(event, delay);
                Ok(false)
            }
            _ => {
                self.current.handle(event).await?;
                self.settle().await?;
                Ok(true)
            }
        }
    }

    fn debounce(&mut self, event: UiEvent, delay: Duration) {
        if let Some(pending) = self.pending_filter.take() {
            pending.abort();
        }
        let page = Arc::clone(&self.current);
        self.pending_filter = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = page.handle(event).await {
                tracing::error!(error = %e, "Debounced filter failed");
            }
        }));
    }

    /// The mounted page's view, after applying navigations queued by
    /// debounced filters that completed in the background.
    pub async fn view(&mut self) -> Result<PageView> {
        self.settle().await?;
        Ok(self.current.view().await)
    }

    /// The action numbered `index` (1-based) in the rendered view.
    pub async fn action(&mut self, index: usize) -> Result<Option<Action>> {
        let root = self.view().await?.root();
        Ok(index
            .checked_sub(1)
            .and_then(|i| root.collect_actions().get(i).map(|(_, action)| (*action).clone())))
    }
}
