//! End-to-end monitor flows: marker file lifecycle through topic publication.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::tempdir;
use tokio::sync::mpsc;
use vigil_runtime::{
    start_monitor_runtime, ChatTransport, CommandOrigin, FileMarkerProbe, MonitorCommand,
    MonitorInboundEvent, MonitorRuntime, MonitorRuntimeConfig, NoopSoundPlayer, PhrasePicker,
    TransportError,
};

#[derive(Default)]
struct RecordingTransport {
    topic: Mutex<String>,
    broadcasts: Mutex<Vec<String>>,
    says: Mutex<Vec<String>>,
    replies: Mutex<Vec<String>>,
}

impl RecordingTransport {
    fn with_topic(topic: &str) -> Self {
        Self {
            topic: Mutex::new(topic.to_string()),
            ..Self::default()
        }
    }

    fn topic(&self) -> String {
        self.topic.lock().expect("topic lock").clone()
    }

    fn broadcasts(&self) -> Vec<String> {
        self.broadcasts.lock().expect("broadcasts lock").clone()
    }

    fn says(&self) -> Vec<String> {
        self.says.lock().expect("says lock").clone()
    }

    fn replies(&self) -> Vec<String> {
        self.replies.lock().expect("replies lock").clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn broadcast(&self, message: &str) -> Result<(), TransportError> {
        self.broadcasts
            .lock()
            .expect("broadcasts lock")
            .push(message.to_string());
        Ok(())
    }

    async fn say(&self, _channel: &str, message: &str) -> Result<(), TransportError> {
        self.says
            .lock()
            .expect("says lock")
            .push(message.to_string());
        Ok(())
    }

    async fn reply(&self, _origin: &CommandOrigin, message: &str) -> Result<(), TransportError> {
        self.replies
            .lock()
            .expect("replies lock")
            .push(message.to_string());
        Ok(())
    }

    async fn publish_topic(&self, _channel: &str, topic: &str) -> Result<(), TransportError> {
        *self.topic.lock().expect("topic lock") = topic.to_string();
        Ok(())
    }

    async fn channel_topic(&self, _channel: &str) -> Result<String, TransportError> {
        Ok(self.topic())
    }
}

struct FirstPhrasePicker;

impl PhrasePicker for FirstPhrasePicker {
    fn pick<'a>(&mut self, phrases: &'a [String]) -> Option<&'a str> {
        phrases.first().map(String::as_str)
    }
}

fn test_config() -> MonitorRuntimeConfig {
    MonitorRuntimeConfig {
        channel: "#lab".to_string(),
        poll_interval: Duration::from_millis(20),
        ..MonitorRuntimeConfig::default()
    }
}

fn origin() -> CommandOrigin {
    CommandOrigin {
        channel: "#lab".to_string(),
        sender: "member".to_string(),
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool, timeout: Duration, label: &str) {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {label}");
}

fn start_runtime(
    transport: Arc<RecordingTransport>,
    marker_path: &Path,
) -> (
    vigil_runtime::MonitorRuntimeHandle,
    mpsc::Sender<MonitorInboundEvent>,
) {
    let runtime = MonitorRuntime::new(
        test_config(),
        transport,
        Box::new(FileMarkerProbe::new(marker_path.to_path_buf())),
        Box::new(FirstPhrasePicker),
        Box::new(NoopSoundPlayer),
    );
    let (event_tx, event_rx) = mpsc::channel(16);
    let handle = start_monitor_runtime(runtime, event_rx).expect("start monitor runtime");
    (handle, event_tx)
}

#[tokio::test]
async fn integration_marker_lifecycle_drives_alert_report_and_teardown() {
    let temp = tempdir().expect("tempdir");
    let marker = temp.path().join("open");
    let transport = Arc::new(RecordingTransport::with_topic("Status | note"));
    let (mut handle, event_tx) = start_runtime(transport.clone(), &marker);

    // Room opens when the marker appears; exactly one alert goes out.
    std::fs::write(&marker, "").expect("create marker");
    wait_until(
        || !transport.broadcasts().is_empty(),
        Duration::from_secs(2),
        "open alert broadcast",
    )
    .await;
    assert_eq!(
        transport.broadcasts(),
        vec!["Activity detected".to_string()]
    );

    // A report lands in the status segment; the annotation survives.
    event_tx
        .send(MonitorInboundEvent::Command {
            origin: origin(),
            command: MonitorCommand::SubmitReport {
                text: "soldering".to_string(),
            },
        })
        .await
        .expect("send report");
    wait_until(
        || transport.topic() == "Current activity: soldering | note",
        Duration::from_secs(2),
        "topic rebuild after report",
    )
    .await;
    assert!(transport.says().contains(&"Understood.".to_string()));

    // Room closes when the marker disappears: ended message, stripped topic.
    std::fs::remove_file(&marker).expect("remove marker");
    wait_until(
        || transport.broadcasts().len() == 2,
        Duration::from_secs(2),
        "activity ended broadcast",
    )
    .await;
    assert_eq!(
        transport.broadcasts(),
        vec![
            "Activity detected".to_string(),
            "Activity ended.".to_string()
        ]
    );
    wait_until(
        || transport.topic() == "note",
        Duration::from_secs(2),
        "status segment stripped on close",
    )
    .await;

    handle.shutdown().await;
}

#[tokio::test]
async fn integration_pull_and_reset_flow_preserves_unowned_segments() {
    let temp = tempdir().expect("tempdir");
    let marker = temp.path().join("open");
    let transport = Arc::new(RecordingTransport::with_topic(
        "Status | eventA | eventB",
    ));
    std::fs::write(&marker, "").expect("create marker");
    let (mut handle, event_tx) = start_runtime(transport.clone(), &marker);

    wait_until(
        || !transport.broadcasts().is_empty(),
        Duration::from_secs(2),
        "open alert broadcast",
    )
    .await;

    // Pull adopts the first annotation and consumes it from the topic.
    event_tx
        .send(MonitorInboundEvent::Command {
            origin: origin(),
            command: MonitorCommand::PullFromTopic,
        })
        .await
        .expect("send pull");
    wait_until(
        || transport.topic() == "Current activity: eventA | eventB",
        Duration::from_secs(2),
        "topic rebuild after pull",
    )
    .await;
    assert!(transport
        .says()
        .contains(&"Updating status from topic".to_string()));

    // Reset drops the status segment content; eventB is not the bot's.
    event_tx
        .send(MonitorInboundEvent::Command {
            origin: origin(),
            command: MonitorCommand::ResetTopic,
        })
        .await
        .expect("send reset");
    wait_until(
        || transport.topic() == "Current activity:  | eventB",
        Duration::from_secs(2),
        "topic rebuild after reset",
    )
    .await;

    // Second reset with nothing reported is a no-op with its own reply.
    event_tx
        .send(MonitorInboundEvent::Command {
            origin: origin(),
            command: MonitorCommand::ResetTopic,
        })
        .await
        .expect("send second reset");
    wait_until(
        || transport.says().contains(&"No changes made.".to_string()),
        Duration::from_secs(2),
        "no-changes reply on repeated reset",
    )
    .await;
    assert_eq!(transport.topic(), "Current activity:  | eventB");

    handle.shutdown().await;
}

#[tokio::test]
async fn integration_commands_from_other_channels_are_redirected() {
    let temp = tempdir().expect("tempdir");
    let marker = temp.path().join("open");
    let transport = Arc::new(RecordingTransport::with_topic("Status"));
    std::fs::write(&marker, "").expect("create marker");
    let (mut handle, event_tx) = start_runtime(transport.clone(), &marker);

    event_tx
        .send(MonitorInboundEvent::Command {
            origin: CommandOrigin {
                channel: "#offtopic".to_string(),
                sender: "member".to_string(),
            },
            command: MonitorCommand::SubmitReport {
                text: "party".to_string(),
            },
        })
        .await
        .expect("send misdirected report");

    wait_until(
        || !transport.replies().is_empty(),
        Duration::from_secs(2),
        "redirect reply",
    )
    .await;
    assert_eq!(
        transport.replies(),
        vec!["You have to do this from #lab".to_string()]
    );
    assert_eq!(transport.topic(), "Status");

    handle.shutdown().await;
}
