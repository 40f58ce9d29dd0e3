// Dashboard service - Owns the view state and runs every pipeline into it
use crate::application::availability_service::AvailabilityService;
use crate::application::uv_repository::{FetchError, UvRepository};
use crate::domain::dashboard::{Availability, CurrentCondition, DashboardState};
use crate::domain::interaction::{InteractionController, PointerEvent, PointerEventError};
use crate::domain::series::aggregate;
use crate::domain::time::TimeNormalizer;
use crate::domain::uv::Reading;
use crate::domain::window::{WindowError, WindowRequest, WindowSelection};
use crate::infrastructure::config::DisplaySettings;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::sync::watch;

/// Request generations per pipeline. A result is only applied while its
/// generation is still the newest one issued for that pipeline.
#[derive(Default)]
struct Generations {
    latest: AtomicU64,
    series: AtomicU64,
    availability: AtomicU64,
}

impl Generations {
    fn next(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(counter: &AtomicU64, generation: u64) -> bool {
        counter.load(Ordering::SeqCst) == generation
    }
}

pub struct DashboardService {
    repository: Arc<dyn UvRepository>,
    availability: AvailabilityService,
    normalizer: TimeNormalizer,
    presets: Vec<u32>,
    interaction: Mutex<InteractionController>,
    generations: Generations,
    state: watch::Sender<DashboardState>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn UvRepository>, display: &DisplaySettings) -> Self {
        let selection = WindowSelection::Latest {
            count: display.latest_count,
        };
        let (state, _) = watch::channel(DashboardState::new(selection, display.show_point_markers));

        Self {
            availability: AvailabilityService::new(repository.clone()),
            repository,
            normalizer: TimeNormalizer::from_hours(display.utc_offset_hours),
            presets: display.presets_days.clone(),
            interaction: Mutex::new(InteractionController::new(display.suppression())),
            generations: Generations::default(),
            state,
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn presets(&self) -> &[u32] {
        &self.presets
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Reload the latest reading, the selected window and preset availability.
    /// The three pipelines write disjoint parts of the state.
    pub async fn refresh(&self) {
        let (selection, generation) = self.claim_series(None);
        let series = async {
            match selection.request(Utc::now()) {
                Ok(request) => self.load_series(selection, generation, request).await,
                Err(e) => tracing::warn!("Skipping series reload for {:?}: {}", selection, e),
            }
        };
        tokio::join!(self.load_latest(), series, self.probe_availability());
    }

    pub async fn load_latest(&self) {
        let generation = Generations::next(&self.generations.latest);
        let result = self.repository.fetch_latest().await;

        self.state.send_if_modified(|state| {
            if !Generations::is_current(&self.generations.latest, generation) {
                tracing::debug!("Discarding stale latest reading (generation {})", generation);
                return false;
            }

            match result {
                Ok(reading) => {
                    state.current = Some(CurrentCondition::from_reading(&reading, &self.normalizer));
                    state.current_message = None;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch latest UV reading: {}", e);
                    state.current_message = Some(e.user_message().to_string());
                }
            }
            true
        });
    }

    /// Switch the window and load its series.
    /// The selection is only stored once its request could be planned.
    pub async fn select_window(&self, selection: WindowSelection) -> Result<(), WindowError> {
        selection.validate()?;
        let request = selection.request(Utc::now())?;
        let (selection, generation) = self.claim_series(Some(selection));
        self.load_series(selection, generation, request).await;
        Ok(())
    }

    /// Read (or replace) the selection and issue its series generation under
    /// the state lock, so a later selection change always gets a newer one.
    fn claim_series(&self, replacement: Option<WindowSelection>) -> (WindowSelection, u64) {
        let mut claimed = (WindowSelection::default(), 0);
        self.state.send_if_modified(|state| {
            let changed = replacement
                .is_some_and(|next| std::mem::replace(&mut state.selection, next) != next);
            claimed = (state.selection, Generations::next(&self.generations.series));
            changed
        });
        claimed
    }

    async fn load_series(&self, selection: WindowSelection, generation: u64, request: WindowRequest) {
        let result = self.fetch_window(request).await;

        // A new series invalidates whatever point was hovered or selected.
        let mut interaction = self.lock_interaction();
        self.state.send_if_modified(|state| {
            if !Generations::is_current(&self.generations.series, generation) {
                tracing::debug!("Discarding stale series for {:?} (generation {})", selection, generation);
                return false;
            }

            match result {
                Ok(readings) => {
                    tracing::debug!("Aggregating {} readings for {:?}", readings.len(), selection);
                    state.series = aggregate(&readings, &self.normalizer);
                    if state.series.is_empty() {
                        tracing::info!("No UV readings for {:?}", selection);
                    }
                    state.series_message = None;
                    interaction.reset();
                    state.interaction = interaction.state();
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch UV series for {:?}: {}", selection, e);
                    state.series_message = Some(e.user_message().to_string());
                }
            }
            true
        });
    }

    async fn fetch_window(&self, request: WindowRequest) -> Result<Vec<Reading>, FetchError> {
        match request {
            WindowRequest::Page { limit, page } => self.repository.fetch_page(limit, page).await,
            WindowRequest::Range { start, end } => self.repository.fetch_range(start, end).await,
        }
    }

    pub async fn probe_availability(&self) {
        let generation = Generations::next(&self.generations.availability);
        let presets = self.availability.probe(&self.presets, Utc::now()).await;

        self.state.send_if_modified(|state| {
            if !Generations::is_current(&self.generations.availability, generation) {
                return false;
            }
            state.availability = Availability::Resolved(presets);
            true
        });
    }

    /// Feed a hover or click into the interaction state machine.
    /// Returns whether the visible interaction state changed.
    pub fn pointer(&self, event: PointerEvent) -> Result<bool, PointerEventError> {
        let event = event.validate()?;
        let mut interaction = self.lock_interaction();

        if !interaction.handle(event, Instant::now()) {
            return Ok(false);
        }
        let next = interaction.state();
        self.state.send_modify(|state| state.interaction = next);
        Ok(true)
    }

    pub fn hover_ended(&self) {
        let mut interaction = self.lock_interaction();
        interaction.hover_ended();
        let next = interaction.state();
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.interaction, next) != next);
    }

    pub fn reset_interaction(&self) {
        let mut interaction = self.lock_interaction();
        interaction.reset();
        let next = interaction.state();
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.interaction, next) != next);
    }

    pub fn set_point_markers(&self, show: bool) {
        self.state.send_if_modified(|state| {
            std::mem::replace(&mut state.chart.show_point_markers, show) != show
        });
    }

    fn lock_interaction(&self) -> MutexGuard<'_, InteractionController> {
        self.interaction
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
