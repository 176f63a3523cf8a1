//! Single-actor monitor runtime: presence sampling plus command dispatch.
//!
//! One spawned task owns the report store and the occupancy machine and
//! processes interval ticks, inbound trigger events, and shutdown through a
//! single select loop, so no two core operations ever run concurrently.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use vigil_core::{
    current_unix_timestamp_ms, report_clock_stamp, transition_log_stamp, ActivityReport,
    OccupancyMonitor, OccupancyState, OccupancyTransition, ReportStore,
};
use vigil_topic::{
    count_report_events, synchronize, TopicSyncConfig, TopicSyncMode, TopicSyncOutcome,
    DEFAULT_TOPIC_DELIMITER, DEFAULT_TOPIC_HEADER,
};

use crate::monitor_contract::{ChatTransport, CommandOrigin, MonitorCommand, MonitorInboundEvent};
use crate::phrase::{
    default_alert_phrases, default_unknown_activity_phrases, PhrasePicker, DEFAULT_ALERT_PHRASES,
};
use crate::presence::PresenceProbe;
use crate::sound::SoundPlayer;
use crate::status_snapshot::{persist_status_snapshot, MonitorStatusSnapshot};

const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 10;
const DEFAULT_CHANNEL: &str = "#clubroom";

const REPLY_WRONG_CHANNEL_PREFIX: &str = "You have to do this from ";
const REPLY_ROOM_NOT_OPEN: &str = "Room is not open";
const REPLY_EMPTY_REPORT: &str = "Information content zero..";
const REPLY_NO_CHANGES: &str = "No changes made.";
const REPLY_NO_MARKED_EVENTS: &str = "Topic has no marked events.";
const REPLY_SENSORS_MISTAKEN: &str = "Sensors indicate that you must be mistaken.";
const REPLY_NOTHING_HAPPENING: &str = "Nothing is currently happening";
const REPLY_UNDERSTOOD: &str = "Understood.";
const SAY_UPDATING_FROM_TOPIC: &str = "Updating status from topic";
const BROADCAST_CLEARING_TOPIC: &str = "Clearing my changes from topic";
const BROADCAST_ACTIVITY_ENDED: &str = "Activity ended.";

#[derive(Debug, Clone)]
/// Public struct `MonitorRuntimeConfig` used across Vigil components.
pub struct MonitorRuntimeConfig {
    pub channel: String,
    pub poll_interval: Duration,
    pub topic_header: String,
    pub topic_delimiter: String,
    pub alert_phrases: Vec<String>,
    pub unknown_activity_phrases: Vec<String>,
    pub state_path: Option<PathBuf>,
}

impl Default for MonitorRuntimeConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECONDS),
            topic_header: DEFAULT_TOPIC_HEADER.to_string(),
            topic_delimiter: DEFAULT_TOPIC_DELIMITER.to_string(),
            alert_phrases: default_alert_phrases(),
            unknown_activity_phrases: default_unknown_activity_phrases(),
            state_path: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Counters for one loop iteration; logged when anything notable happened.
pub struct MonitorCycleReport {
    pub presence_samples: usize,
    pub probe_failures: usize,
    pub transitions: usize,
    pub commands_handled: usize,
    pub commands_rejected: usize,
    pub topic_merges: usize,
    pub publish_failures: usize,
}

impl MonitorCycleReport {
    fn is_quiet(&self) -> bool {
        self.probe_failures == 0
            && self.transitions == 0
            && self.commands_handled == 0
            && self.commands_rejected == 0
            && self.topic_merges == 0
            && self.publish_failures == 0
    }
}

/// Public struct `MonitorRuntime` used across Vigil components.
///
/// Owns all mutable monitor state. Hosts either hand it to
/// [`start_monitor_runtime`] or drive [`Self::poll_presence_cycle`] and
/// [`Self::handle_inbound_event`] directly from their own loop.
pub struct MonitorRuntime {
    config: MonitorRuntimeConfig,
    sync_config: TopicSyncConfig,
    report_store: ReportStore,
    occupancy: OccupancyMonitor,
    transport: Arc<dyn ChatTransport>,
    presence: Box<dyn PresenceProbe>,
    phrases: Box<dyn PhrasePicker>,
    sounds: Box<dyn SoundPlayer>,
    tick_count: u64,
    last_transition_unix_ms: u64,
}

impl MonitorRuntime {
    pub fn new(
        config: MonitorRuntimeConfig,
        transport: Arc<dyn ChatTransport>,
        presence: Box<dyn PresenceProbe>,
        phrases: Box<dyn PhrasePicker>,
        sounds: Box<dyn SoundPlayer>,
    ) -> Self {
        let sync_config = TopicSyncConfig {
            header: config.topic_header.clone(),
            delimiter: config.topic_delimiter.clone(),
        };
        Self {
            config,
            sync_config,
            report_store: ReportStore::new(),
            occupancy: OccupancyMonitor::new(),
            transport,
            presence,
            phrases,
            sounds,
            tick_count: 0,
            last_transition_unix_ms: 0,
        }
    }

    pub fn occupancy_state(&self) -> OccupancyState {
        self.occupancy.state()
    }

    pub fn report_snapshot(&self) -> ActivityReport {
        self.report_store.current_report()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Takes one presence sample and applies transition side effects.
    ///
    /// A probe error is logged and treated as "absent", so occupancy
    /// degrades to closed instead of crashing the polling loop.
    pub async fn poll_presence_cycle(&mut self, report: &mut MonitorCycleReport) {
        report.presence_samples = report.presence_samples.saturating_add(1);
        self.tick_count = self.tick_count.saturating_add(1);

        let marker_present = match self.presence.marker_present() {
            Ok(present) => present,
            Err(error) => {
                report.probe_failures = report.probe_failures.saturating_add(1);
                eprintln!("presence probe failed; treating marker as absent: {error:#}");
                false
            }
        };

        let Some(transition) = self.occupancy.sample(marker_present) else {
            return;
        };
        report.transitions = report.transitions.saturating_add(1);
        self.last_transition_unix_ms = current_unix_timestamp_ms();

        match transition {
            OccupancyTransition::Opened => {
                println!("{} -- Open!", transition_log_stamp());
                let alert = self
                    .phrases
                    .pick(&self.config.alert_phrases)
                    .unwrap_or(DEFAULT_ALERT_PHRASES[0])
                    .to_string();
                self.broadcast(&alert).await;
            }
            OccupancyTransition::Closed => {
                println!("{} -- Closed!", transition_log_stamp());
                self.broadcast(BROADCAST_ACTIVITY_ENDED).await;
                // Occupancy is already closed, so the reset transform strips
                // the status segment and leaves the annotations untouched.
                if let Some(TopicSyncOutcome::Updated { topic }) =
                    self.merge_topic(TopicSyncMode::Reset, report).await
                {
                    report.topic_merges = report.topic_merges.saturating_add(1);
                    self.publish(&topic, report).await;
                }
                self.report_store.clear_report();
            }
        }
        self.persist_snapshot();
    }

    /// Processes one inbound trigger event from the transport.
    pub async fn handle_inbound_event(
        &mut self,
        event: MonitorInboundEvent,
        report: &mut MonitorCycleReport,
    ) {
        match event {
            MonitorInboundEvent::Command { origin, command } => {
                self.handle_command(&origin, command, report).await;
            }
            MonitorInboundEvent::TopicChanged {
                channel,
                topic,
                bot_initiated,
            } => {
                self.handle_topic_changed(&channel, &topic, bot_initiated, report)
                    .await;
            }
            MonitorInboundEvent::DoorbellSignal => {
                if self.occupancy.state().is_open() {
                    if let Err(error) = self.sounds.play_doorbell() {
                        eprintln!("doorbell playback failed: {error:#}");
                    }
                }
            }
        }
    }

    async fn handle_command(
        &mut self,
        origin: &CommandOrigin,
        command: MonitorCommand,
        report: &mut MonitorCycleReport,
    ) {
        if origin.channel != self.config.channel {
            report.commands_rejected = report.commands_rejected.saturating_add(1);
            let redirect = format!("{REPLY_WRONG_CHANNEL_PREFIX}{}", self.config.channel);
            self.reply(origin, &redirect).await;
            return;
        }

        match command {
            MonitorCommand::SubmitReport { text } | MonitorCommand::SubmitRelayReport { text } => {
                self.handle_submit_report(origin, &text, report).await;
            }
            MonitorCommand::PullFromTopic => {
                self.handle_pull_from_topic(origin, report).await;
            }
            MonitorCommand::ResetTopic => {
                self.handle_reset_topic(origin, report).await;
            }
            MonitorCommand::StatusQuery => {
                self.handle_status_query(report).await;
            }
        }
    }

    async fn handle_submit_report(
        &mut self,
        origin: &CommandOrigin,
        text: &str,
        report: &mut MonitorCycleReport,
    ) {
        if !self.occupancy.state().is_open() {
            report.commands_rejected = report.commands_rejected.saturating_add(1);
            self.reply(origin, REPLY_ROOM_NOT_OPEN).await;
            return;
        }
        let text = text.trim();
        if text.is_empty() {
            report.commands_rejected = report.commands_rejected.saturating_add(1);
            self.reply(origin, REPLY_EMPTY_REPORT).await;
            return;
        }

        let added_events = count_report_events(text, &self.sync_config.delimiter);
        let pending = self
            .report_store
            .pending_event_count()
            .saturating_add(added_events);
        let stamp = report_clock_stamp();
        self.report_store.set_report(text, &stamp, pending);
        println!("{} -- {text}", transition_log_stamp());

        report.commands_handled = report.commands_handled.saturating_add(1);
        self.say(REPLY_UNDERSTOOD).await;
        if let Some(TopicSyncOutcome::Updated { topic }) =
            self.merge_topic(TopicSyncMode::SubmitReport, report).await
        {
            report.topic_merges = report.topic_merges.saturating_add(1);
            self.publish(&topic, report).await;
        }
        self.persist_snapshot();
    }

    async fn handle_pull_from_topic(
        &mut self,
        origin: &CommandOrigin,
        report: &mut MonitorCycleReport,
    ) {
        if !self.occupancy.state().is_open() {
            report.commands_rejected = report.commands_rejected.saturating_add(1);
            self.reply(origin, REPLY_SENSORS_MISTAKEN).await;
            return;
        }

        match self.merge_topic(TopicSyncMode::PullFromTopic, report).await {
            Some(TopicSyncOutcome::Updated { topic }) => {
                report.commands_handled = report.commands_handled.saturating_add(1);
                report.topic_merges = report.topic_merges.saturating_add(1);
                let adopted = self.report_store.current_report();
                println!("{} -- {}", transition_log_stamp(), adopted.text);
                self.say(SAY_UPDATING_FROM_TOPIC).await;
                self.publish(&topic, report).await;
                self.persist_snapshot();
            }
            Some(TopicSyncOutcome::NoMarkedEvents) => {
                report.commands_rejected = report.commands_rejected.saturating_add(1);
                self.say(REPLY_NO_MARKED_EVENTS).await;
            }
            Some(TopicSyncOutcome::StateGated) | None => {}
        }
    }

    async fn handle_reset_topic(
        &mut self,
        origin: &CommandOrigin,
        report: &mut MonitorCycleReport,
    ) {
        if !self.occupancy.state().is_open() {
            report.commands_rejected = report.commands_rejected.saturating_add(1);
            self.reply(origin, REPLY_NOTHING_HAPPENING).await;
            return;
        }
        if !self.report_store.is_reported() {
            report.commands_rejected = report.commands_rejected.saturating_add(1);
            self.say(REPLY_NO_CHANGES).await;
            return;
        }

        self.broadcast(BROADCAST_CLEARING_TOPIC).await;
        println!("{} -- Topic reset", transition_log_stamp());
        if let Some(TopicSyncOutcome::Updated { topic }) =
            self.merge_topic(TopicSyncMode::Reset, report).await
        {
            report.commands_handled = report.commands_handled.saturating_add(1);
            report.topic_merges = report.topic_merges.saturating_add(1);
            self.publish(&topic, report).await;
            self.persist_snapshot();
        }
    }

    async fn handle_status_query(&mut self, report: &mut MonitorCycleReport) {
        report.commands_handled = report.commands_handled.saturating_add(1);
        if !self.occupancy.state().is_open() {
            self.say(REPLY_NOTHING_HAPPENING).await;
            return;
        }
        if self.report_store.is_reported() {
            let current = self.report_store.current_report();
            let line = format!("Last report was: {} at {}", current.text, current.reported_at);
            self.say(&line).await;
        } else {
            let phrase = self
                .phrases
                .pick(&self.config.unknown_activity_phrases)
                .map(str::to_string);
            if let Some(phrase) = phrase {
                self.say(&phrase).await;
            }
        }
    }

    async fn handle_topic_changed(
        &mut self,
        channel: &str,
        topic: &str,
        bot_initiated: bool,
        report: &mut MonitorCycleReport,
    ) {
        // The bot's own republication must not feed back into another merge.
        if bot_initiated || channel != self.config.channel {
            return;
        }
        if !self.occupancy.state().is_open() || !self.report_store.is_reported() {
            return;
        }

        let stamp = report_clock_stamp();
        let outcome = synchronize(
            topic,
            &mut self.report_store,
            self.occupancy.state(),
            TopicSyncMode::SubmitReport,
            &stamp,
            &self.sync_config,
        );
        if let TopicSyncOutcome::Updated { topic: merged } = outcome {
            // Already canonical: publishing again would only invite loops.
            if merged != topic {
                report.topic_merges = report.topic_merges.saturating_add(1);
                self.publish(&merged, report).await;
            }
        }
    }

    /// Reads the live topic and runs one synchronization pass over it.
    /// Returns `None` when the topic could not be fetched; the merge is then
    /// deferred to the next natural sync point.
    async fn merge_topic(
        &mut self,
        mode: TopicSyncMode,
        report: &mut MonitorCycleReport,
    ) -> Option<TopicSyncOutcome> {
        let current_topic = match self.transport.channel_topic(&self.config.channel).await {
            Ok(topic) => topic,
            Err(error) => {
                report.publish_failures = report.publish_failures.saturating_add(1);
                eprintln!("topic fetch failed; {} deferred: {error}", mode.as_str());
                return None;
            }
        };
        let stamp = report_clock_stamp();
        Some(synchronize(
            &current_topic,
            &mut self.report_store,
            self.occupancy.state(),
            mode,
            &stamp,
            &self.sync_config,
        ))
    }

    async fn publish(&self, topic: &str, report: &mut MonitorCycleReport) {
        if let Err(error) = self
            .transport
            .publish_topic(&self.config.channel, topic)
            .await
        {
            report.publish_failures = report.publish_failures.saturating_add(1);
            eprintln!("topic publish failed; retrying at next sync point: {error}");
        }
    }

    async fn broadcast(&self, message: &str) {
        if let Err(error) = self.transport.broadcast(message).await {
            eprintln!("broadcast failed: {error}");
        }
    }

    async fn say(&self, message: &str) {
        if let Err(error) = self.transport.say(&self.config.channel, message).await {
            eprintln!("say failed: {error}");
        }
    }

    async fn reply(&self, origin: &CommandOrigin, message: &str) {
        if let Err(error) = self.transport.reply(origin, message).await {
            eprintln!("reply failed: {error}");
        }
    }

    fn persist_snapshot(&self) {
        let Some(state_path) = self.config.state_path.as_ref() else {
            return;
        };
        let snapshot = MonitorStatusSnapshot::capture(
            self.occupancy.state(),
            &self.report_store.current_report(),
            self.tick_count,
            self.last_transition_unix_ms,
        );
        if let Err(error) = persist_status_snapshot(state_path, &snapshot) {
            eprintln!(
                "monitor status snapshot persist failed: path={} error={error}",
                state_path.display()
            );
        }
    }
}

#[derive(Debug)]
/// Public struct `MonitorRuntimeHandle` used across Vigil components.
pub struct MonitorRuntimeHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MonitorRuntimeHandle {
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub async fn shutdown(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

/// Spawns the monitor loop on the current Tokio runtime.
pub fn start_monitor_runtime(
    runtime: MonitorRuntime,
    events: mpsc::Receiver<MonitorInboundEvent>,
) -> Result<MonitorRuntimeHandle> {
    if runtime.config.poll_interval.is_zero() {
        bail!("monitor poll interval must be greater than zero");
    }
    if runtime.config.channel.trim().is_empty() {
        bail!("monitor channel must not be empty");
    }
    if runtime.config.topic_delimiter.is_empty() {
        bail!("topic delimiter must not be empty");
    }
    if runtime.config.alert_phrases.is_empty() || runtime.config.unknown_activity_phrases.is_empty()
    {
        bail!("alert and unknown-activity phrase sets must not be empty");
    }

    let handle = tokio::runtime::Handle::try_current()
        .context("monitor runtime requires an active Tokio runtime")?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = handle.spawn(run_monitor_loop(runtime, events, shutdown_rx));
    Ok(MonitorRuntimeHandle {
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

async fn run_monitor_loop(
    mut runtime: MonitorRuntime,
    mut events: mpsc::Receiver<MonitorInboundEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(runtime.config.poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let mut report = MonitorCycleReport::default();
        tokio::select! {
            _ = interval.tick() => {
                runtime.poll_presence_cycle(&mut report).await;
            }
            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                runtime.handle_inbound_event(event, &mut report).await;
            }
            _ = &mut shutdown_rx => {
                break;
            }
        }

        if !report.is_quiet() {
            println!(
                "monitor cycle: samples={} probe_failures={} transitions={} commands={} rejected={} merges={} publish_failures={}",
                report.presence_samples,
                report.probe_failures,
                report.transitions,
                report.commands_handled,
                report.commands_rejected,
                report.topic_merges,
                report.publish_failures,
            );
        }
    }
}
