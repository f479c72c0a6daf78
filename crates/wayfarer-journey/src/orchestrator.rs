//! The journey orchestrator: one canonical journey, one update at a time.
//!
//! Every mutation funnels through the same path: take the lock and claim
//! the in-flight slot, build the prompt, release the lock for the backend
//! call (the only suspension point), then retake the lock to commit. A
//! generation counter stamped at claim time lets a reset that happened
//! mid-flight invalidate the result instead of racing it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::{debug, info, warn};
use wayfarer_core::error::TravelError;
use wayfarer_core::generative::{GenerationRequest, GenerativeClient};
use wayfarer_core::time::{Clock, Scheduler, TimerHandle};

use crate::domain::{
    CharacterProfile, EventKind, EventLog, JourneyUpdate, Phase, TravelEvent, TravelState,
};
use crate::{parser, prompt};

/// Response length target for every backend call, in tokens.
const MAX_RESPONSE_TOKENS: u32 = 1000;

/// Drives the single canonical journey.
///
/// The orchestrator owns the travel state and the event log, schedules the
/// auto-advance timer after each accepted update, and rejects any update
/// while another is in flight. All collaborators are injected, so tests
/// run it against a hand-set clock, a hand-fired scheduler, and a scripted
/// backend.
pub struct JourneyOrchestrator {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    scheduler: Arc<dyn Scheduler>,
    client: Arc<dyn GenerativeClient>,
    weak_self: Weak<JourneyOrchestrator>,
}

/// Mutable journey state. The guard is never held across an await.
struct Inner {
    /// Present exactly while the journey is active.
    profile: Option<CharacterProfile>,
    state: TravelState,
    log: EventLog,
    /// The single auto-advance timer slot.
    timer: Option<Box<dyn TimerHandle>>,
    in_flight: bool,
    /// Bumped on every claim and every reset. A result only commits if the
    /// generation still matches its claim.
    generation: u64,
}

impl JourneyOrchestrator {
    /// Creates an orchestrator with injected collaborators.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn Scheduler>,
        client: Arc<dyn GenerativeClient>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            inner: Mutex::new(Inner {
                profile: None,
                state: TravelState::default(),
                log: EventLog::default(),
                timer: None,
                in_flight: false,
                generation: 0,
            }),
            clock,
            scheduler,
            client,
            weak_self: weak_self.clone(),
        })
    }

    /// Starts a journey for `profile`.
    ///
    /// On success the journey becomes active, a `journey_start` event is
    /// appended, and the first auto-advance timer is armed. On any failure
    /// nothing changes: no event, no state mutation, no timer.
    ///
    /// # Errors
    ///
    /// Returns [`TravelError::Busy`] while an update is in flight,
    /// [`TravelError::AlreadyActive`] if a journey is already underway,
    /// [`TravelError::Validation`] for an incomplete profile, transport and
    /// parse failures from the backend round-trip, and
    /// [`TravelError::Superseded`] if a reset landed mid-flight.
    pub async fn start_journey(
        &self,
        profile: CharacterProfile,
    ) -> Result<JourneyUpdate, TravelError> {
        let (prompt_text, generation) = {
            let mut inner = self.lock_inner();
            if inner.in_flight {
                return Err(TravelError::Busy);
            }
            if inner.state.is_active {
                return Err(TravelError::AlreadyActive);
            }
            prompt::validate_profile(&profile)?;
            let text = prompt::start_prompt(&profile, self.clock.now());
            (text, Self::claim_update(&mut inner))
        };
        info!(
            name = %profile.name,
            destination = %profile.destination,
            "starting journey"
        );

        match self.round_trip(prompt_text).await {
            Ok(update) => {
                self.commit_update(
                    generation,
                    &update,
                    EventKind::JourneyStart,
                    None,
                    Some(profile),
                )?;
                Ok(update)
            }
            Err(error) => {
                warn!(error = %error, "journey start failed");
                self.release_failed(generation);
                Err(error)
            }
        }
    }

    /// Redirects the active journey with a user directive.
    ///
    /// Accepting the message cancels the pending auto-advance timer before
    /// the backend call is issued, so the old timeline can no longer fire.
    /// A failed round-trip keeps state and log intact but leaves no timer
    /// armed; the next user message can pick the journey back up.
    ///
    /// # Errors
    ///
    /// Returns [`TravelError::Busy`] while an update is in flight,
    /// [`TravelError::NotActive`] without a started journey,
    /// [`TravelError::Validation`] for a blank message, transport and parse
    /// failures from the backend round-trip, and
    /// [`TravelError::Superseded`] if a reset landed mid-flight.
    pub async fn submit_user_message(&self, message: &str) -> Result<JourneyUpdate, TravelError> {
        let (prompt_text, generation) = {
            let mut inner = self.lock_inner();
            if inner.in_flight {
                return Err(TravelError::Busy);
            }
            let Some(profile) = inner.profile.as_ref() else {
                return Err(TravelError::NotActive);
            };
            if message.trim().is_empty() {
                return Err(TravelError::Validation(
                    "user message must not be empty".into(),
                ));
            }
            let text = prompt::intervention_prompt(profile, &inner.state, message);
            if let Some(timer) = inner.timer.take() {
                timer.cancel();
            }
            (text, Self::claim_update(&mut inner))
        };
        info!("user intervention accepted");

        match self.round_trip(prompt_text).await {
            Ok(update) => {
                self.commit_update(
                    generation,
                    &update,
                    EventKind::UserIntervention,
                    Some(message.to_owned()),
                    None,
                )?;
                Ok(update)
            }
            Err(error) => {
                warn!(error = %error, "user intervention failed, no timer is armed");
                self.release_failed(generation);
                Err(error)
            }
        }
    }

    /// Clears the journey back to the blank state: profile, travel state,
    /// event log, and any pending timer. Valid in every phase. An update
    /// still in flight keeps running, but its result will be discarded as
    /// superseded when it tries to commit.
    pub fn reset_all(&self) {
        let mut inner = self.lock_inner();
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        inner.profile = None;
        inner.state = TravelState::default();
        inner.log.clear();
        inner.generation += 1;
        inner.in_flight = false;
        info!("journey reset");
    }

    /// Snapshot of the travel state.
    #[must_use]
    pub fn travel_state(&self) -> TravelState {
        self.lock_inner().state.clone()
    }

    /// Snapshot of the event log, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TravelEvent> {
        self.lock_inner().log.snapshot()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        let inner = self.lock_inner();
        if inner.in_flight {
            Phase::Busy
        } else if inner.state.is_active {
            Phase::Active
        } else {
            Phase::NotStarted
        }
    }

    /// Runs one timer-driven continuation. Invoked by the scheduler task
    /// armed at the last commit; never by callers directly.
    ///
    /// Failures are logged rather than surfaced, and deliberately do not
    /// re-arm the timer. A stale fire, one whose arming generation no
    /// longer matches, does nothing at all.
    async fn auto_advance(&self, armed_generation: u64) {
        let (prompt_text, generation) = {
            let mut inner = self.lock_inner();
            if inner.generation != armed_generation {
                debug!(armed_generation, "auto-advance skipped, timer superseded");
                return;
            }
            // This fire consumed the armed timer slot.
            inner.timer = None;
            let Some(profile) = inner.profile.as_ref() else {
                return;
            };
            let text = prompt::continuation_prompt(profile, &inner.state, self.clock.now());
            (text, Self::claim_update(&mut inner))
        };
        debug!("auto-advance started");

        match self.round_trip(prompt_text).await {
            Ok(update) => {
                if let Err(error) =
                    self.commit_update(generation, &update, EventKind::Auto, None, None)
                {
                    debug!(error = %error, "auto-advance result discarded");
                }
            }
            Err(error) => {
                warn!(error = %error, "auto-advance failed, no timer is armed");
                self.release_failed(generation);
            }
        }
    }

    /// Marks the update slot claimed and returns the claim's generation.
    /// Caller must hold the lock and have passed every guard.
    fn claim_update(inner: &mut Inner) -> u64 {
        inner.in_flight = true;
        inner.generation += 1;
        inner.generation
    }

    /// One backend call plus parse. The await in here is the orchestrator's
    /// only suspension point.
    async fn round_trip(&self, prompt_text: String) -> Result<JourneyUpdate, TravelError> {
        let raw = self
            .client
            .generate(GenerationRequest {
                prompt: prompt_text,
                max_tokens: MAX_RESPONSE_TOKENS,
            })
            .await?;
        parser::parse_update(&raw)
    }

    /// Applies an accepted update: appends the event, overwrites the
    /// mutable travel state, arms the next timer, and frees the slot.
    ///
    /// # Errors
    ///
    /// Returns [`TravelError::Superseded`] when the generation moved while
    /// the call was in flight; nothing is touched in that case.
    fn commit_update(
        &self,
        generation: u64,
        update: &JourneyUpdate,
        kind: EventKind,
        user_message: Option<String>,
        new_profile: Option<CharacterProfile>,
    ) -> Result<(), TravelError> {
        let mut inner = self.lock_inner();
        if inner.generation != generation {
            debug!(generation, "stale update result discarded");
            return Err(TravelError::Superseded);
        }

        let now = self.clock.now();
        let delay = delay_from_hours(update.next_event_delay_hours);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let next_event_time = now + chrono::Duration::milliseconds(delay.as_millis() as i64);

        let event_id = inner.log.append(
            now,
            kind,
            update.event_description.clone(),
            update.needs_user_input,
            user_message,
        );
        if let Some(profile) = new_profile {
            inner.profile = Some(profile);
        }
        inner.state = TravelState {
            is_active: true,
            current_location: update.current_location.clone(),
            current_activity: update.current_activity.clone(),
            last_update: Some(now),
            next_event_time: Some(next_event_time),
        };
        self.arm_timer(&mut inner, delay);
        inner.in_flight = false;

        info!(
            event_id,
            kind = ?kind,
            location = %update.current_location,
            "journey update applied"
        );
        Ok(())
    }

    /// Frees the update slot after a failed round-trip. A reset that landed
    /// mid-flight already freed it and moved the generation on.
    fn release_failed(&self, generation: u64) {
        let mut inner = self.lock_inner();
        if inner.generation == generation {
            inner.in_flight = false;
        }
    }

    /// Arms the single auto-advance timer slot, cancelling whatever was
    /// armed before. The task checks its arming generation when it fires,
    /// so a cancellation that arrives too late still neutralizes it.
    fn arm_timer(&self, inner: &mut Inner, delay: Duration) {
        let armed_generation = inner.generation;
        let weak = self.weak_self.clone();
        let task = Box::pin(async move {
            if let Some(orchestrator) = weak.upgrade() {
                orchestrator.auto_advance(armed_generation).await;
            }
        });
        let handle = self.scheduler.schedule_after(delay, task);
        if let Some(previous) = inner.timer.replace(handle) {
            previous.cancel();
        }
        debug!(delay_secs = delay.as_secs(), "auto-advance timer armed");
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Timer duration for the backend's hour estimate. The parser guarantees
/// the hours are positive, finite, and bounded.
fn delay_from_hours(hours: f64) -> Duration {
    Duration::from_secs_f64(hours * 3600.0)
}
