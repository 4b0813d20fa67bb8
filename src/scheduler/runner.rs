use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};

use super::handle::SchedulerHandle;
use super::messages::{SchedulerError, SchedulerMessage, SchedulerStatus};
use super::{CycleReport, PollState, Trigger};
use crate::fetcher::{Fetched, InFlight, SharedFetcher};
use crate::pipeline::{Aggregator, FeedReport};
use crate::render::RenderSink;

type CycleId = u64;
type Reply = oneshot::Sender<Result<CycleReport, SchedulerError>>;

const CHANNEL_SIZE: usize = 32;

/// Tag carried by every dispatched fetch.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    cycle: CycleId,
    trigger: Trigger,
    feed: usize,
}

struct Cycle {
    trigger: Trigger,
    pending: usize,
    reports: Vec<FeedReport>,
    started: Instant,
    reply: Option<Reply>,
}

/// Scheduler actor.
///
/// Owns the aggregator and every in-flight fetch. Timer ticks, handle
/// messages and fetch completions are multiplexed on one task, so feed
/// results are ingested one at a time.
///
/// Overlap is gated per feed: a new cycle skips only the feeds whose fetch
/// from an earlier cycle of the same trigger is still outstanding, so a
/// hung request stalls that feed alone.
pub struct PollScheduler<K> {
    aggregator: Aggregator<K>,
    in_flight: InFlight<Ticket>,
    receiver: mpsc::Receiver<SchedulerMessage>,
    interval: Duration,
    update_on_start: bool,
    cycles: HashMap<CycleId, Cycle>,
    next_id: CycleId,
    outstanding: HashSet<(Trigger, usize)>,
    /// Newest manual cycle; the busy indicator follows it.
    latest_manual: Option<CycleId>,
}

impl<K: RenderSink + Send + 'static> PollScheduler<K> {
    pub fn new(
        aggregator: Aggregator<K>,
        fetcher: SharedFetcher,
        interval: Duration,
        update_on_start: bool,
    ) -> (Self, SchedulerHandle) {
        let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
        let scheduler = Self {
            aggregator,
            in_flight: InFlight::new(fetcher),
            receiver,
            interval,
            update_on_start,
            cycles: HashMap::new(),
            next_id: 0,
            outstanding: HashSet::new(),
            latest_manual: None,
        };
        (scheduler, SchedulerHandle::new(sender))
    }

    pub fn aggregator(&self) -> &Aggregator<K> {
        &self.aggregator
    }

    pub fn into_aggregator(self) -> Aggregator<K> {
        self.aggregator
    }

    pub fn state(&self) -> PollState {
        if self.cycles.is_empty() {
            PollState::Idle
        } else {
            PollState::Refreshing
        }
    }

    /// Run until every [`SchedulerHandle`] is dropped.
    pub async fn run(mut self) {
        let first = if self.update_on_start {
            Instant::now()
        } else {
            Instant::now() + self.interval
        };
        let mut timer = tokio::time::interval_at(first, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            feeds = self.aggregator.sources().len(),
            interval_secs = self.interval.as_secs(),
            "scheduler started"
        );

        loop {
            tokio::select! {
                _ = timer.tick() => self.on_timer(),
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle_message(msg),
                    None => break,
                },
                Some(fetched) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    let id = self.settle(fetched);
                    self.try_finish(id);
                }
            }
        }

        tracing::info!(abandoned = self.in_flight.len(), "scheduler stopped");
    }

    /// Run one cycle to completion, outside the timer loop.
    pub async fn poll_once(&mut self, trigger: Trigger) -> CycleReport {
        let due = self.due_feeds(trigger);
        let id = self.start_cycle(trigger, due, None);
        if let Some(report) = self.try_finish(id) {
            return report;
        }

        while let Some(fetched) = self.in_flight.next().await {
            let settled = self.settle(fetched);
            if let Some(report) = self.try_finish(settled) {
                if settled == id {
                    return report;
                }
            }
        }

        CycleReport {
            trigger,
            feeds: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Feeds with no fetch outstanding for `trigger`.
    fn due_feeds(&self, trigger: Trigger) -> Vec<usize> {
        (0..self.aggregator.sources().len())
            .filter(|feed| !self.outstanding.contains(&(trigger, *feed)))
            .collect()
    }

    /// Nothing to dispatch: every feed still has a fetch outstanding.
    fn saturated(&self, due: &[usize]) -> bool {
        due.is_empty() && !self.aggregator.sources().is_empty()
    }

    fn on_timer(&mut self) {
        let due = self.due_feeds(Trigger::Timer);
        if self.saturated(&due) {
            tracing::debug!("every feed still in flight, skipping tick");
            return;
        }
        let id = self.start_cycle(Trigger::Timer, due, None);
        self.try_finish(id);
    }

    fn handle_message(&mut self, msg: SchedulerMessage) {
        match msg {
            SchedulerMessage::Refresh { reply } => {
                let due = self.due_feeds(Trigger::Manual);
                if self.saturated(&due) {
                    tracing::debug!("manual refresh rejected, every feed is still refreshing");
                    match reply {
                        Some(reply) => {
                            let _ = reply.send(Err(SchedulerError::AlreadyRefreshing));
                        }
                        None => self
                            .aggregator
                            .sink_mut()
                            .notice(&SchedulerError::AlreadyRefreshing.to_string()),
                    }
                    return;
                }
                let id = self.start_cycle(Trigger::Manual, due, reply);
                self.try_finish(id);
            }

            SchedulerMessage::Status { reply } => {
                let _ = reply.send(SchedulerStatus {
                    state: self.state(),
                    seen: self.aggregator.seen().len(),
                    rendered: self.aggregator.buffer().len(),
                });
            }

            SchedulerMessage::ResetSeen => self.aggregator.reset_seen(),
        }
    }

    fn start_cycle(&mut self, trigger: Trigger, due: Vec<usize>, reply: Option<Reply>) -> CycleId {
        let id = self.next_id;
        self.next_id += 1;

        let sources = self.aggregator.sources().to_vec();
        tracing::debug!(
            %trigger,
            cycle = id,
            feeds = due.len(),
            skipped = sources.len() - due.len(),
            "poll cycle started"
        );

        if trigger == Trigger::Manual {
            self.latest_manual = Some(id);
            self.aggregator.sink_mut().set_busy(true);
        }

        for &feed in &due {
            self.outstanding.insert((trigger, feed));
            self.in_flight.dispatch(
                Ticket {
                    cycle: id,
                    trigger,
                    feed,
                },
                sources[feed].clone(),
            );
        }

        self.cycles.insert(
            id,
            Cycle {
                trigger,
                pending: due.len(),
                reports: Vec::with_capacity(due.len()),
                started: Instant::now(),
                reply,
            },
        );
        id
    }

    fn settle(&mut self, fetched: Fetched<Ticket>) -> CycleId {
        let Fetched { tag, source, result } = fetched;
        self.outstanding.remove(&(tag.trigger, tag.feed));
        let report = self.aggregator.ingest(&source, result);

        if let Some(cycle) = self.cycles.get_mut(&tag.cycle) {
            cycle.pending = cycle.pending.saturating_sub(1);
            cycle.reports.push(report);
        }
        tag.cycle
    }

    /// Close the cycle once its last feed has settled.
    fn try_finish(&mut self, id: CycleId) -> Option<CycleReport> {
        if self.cycles.get(&id)?.pending > 0 {
            return None;
        }
        let cycle = self.cycles.remove(&id)?;

        if cycle.trigger == Trigger::Manual && self.latest_manual == Some(id) {
            self.latest_manual = None;
            self.aggregator.sink_mut().set_busy(false);
        }

        let report = CycleReport {
            trigger: cycle.trigger,
            feeds: cycle.reports,
            elapsed: cycle.started.elapsed(),
        };
        tracing::info!(
            trigger = %report.trigger,
            admitted = report.admitted(),
            errors = report.errors(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "poll cycle finished"
        );

        if let Some(reply) = cycle.reply {
            let _ = reply.send(Ok(report.clone()));
        }
        Some(report)
    }
}
