//! monitor-app: simulate vital signs for a patient population and evaluate
//! alert rules over each patient's trailing window.
//!
//! Usage:
//!   cargo run -p monitor-app -- --patient-count 50
//!   cargo run -p monitor-app -- --output file:./out
//!   cargo run -p monitor-app -- --output tcp:8085
//!   cargo run -p monitor-app -- --feed ws://localhost:8080 --interval-secs 20
//!   cargo run -p monitor-app -- --replay ./out

use alert_dispatch::ConsoleDispatcher;
use alert_engine::AlertEvaluator;
use chrono::Utc;
use feed_client::{FeedClient, FileReplayReader};
use monitor_core::AlertDispatcher;
use rand::Rng;
use record_store::RecordStore;
use std::sync::Arc;
use std::time::Duration;
use vitals_simulator::{
    CardiacRhythmGenerator, ConsoleSink, FileSink, HeartRateGenerator, ManualAlertGenerator,
    OutputSink, PressureGenerator, SaturationGenerator, StoreSink, TcpSink, VitalGenerator,
};

const DEFAULT_PATIENT_COUNT: u32 = 50;
const DEFAULT_EVAL_PERIOD_SECS: u64 = 20;
const FAST_SIGNAL_PERIOD: Duration = Duration::from_secs(1);
const PRESSURE_PERIOD: Duration = Duration::from_secs(60);
const MANUAL_ALERT_PERIOD: Duration = Duration::from_secs(20);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monitor_app=info,alert_dispatch=warn,vitals_simulator=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let patient_count: u32 = flag_value(&args, "--patient-count").unwrap_or(DEFAULT_PATIENT_COUNT);
    let eval_period_secs: u64 =
        flag_value(&args, "--interval-secs").unwrap_or(DEFAULT_EVAL_PERIOD_SECS);
    let output: String = flag_value(&args, "--output").unwrap_or_else(|| "console".to_string());
    let feed_url: Option<String> = flag_value(&args, "--feed");
    let replay_dir: Option<String> = flag_value(&args, "--replay");

    tracing::info!(
        patient_count,
        eval_period_secs,
        output = %output,
        "starting vital-signs monitor"
    );

    let store = Arc::new(RecordStore::new());
    let dispatcher: Arc<dyn AlertDispatcher> = Arc::new(ConsoleDispatcher);
    let evaluator = Arc::new(AlertEvaluator::new(store.clone(), dispatcher));

    // Generated readings always reach the store so evaluation has a window;
    // the user-selected sink is additional output.
    let mut sinks: Vec<Arc<dyn OutputSink>> = vec![Arc::new(StoreSink::new(store.clone()))];
    match output.as_str() {
        "console" => sinks.push(Arc::new(ConsoleSink)),
        other if other.starts_with("file:") => {
            sinks.push(Arc::new(FileSink::new(&other[5..])));
        }
        other if other.starts_with("tcp:") => {
            let port: u16 = other[4..].parse()?;
            sinks.push(Arc::new(TcpSink::bind(port).await?));
        }
        other => {
            anyhow::bail!("unknown output '{other}' (expected console, file:<dir>, or tcp:<port>)")
        }
    }

    // Seed the store from a previous run's file output before anything
    // starts generating or evaluating.
    if let Some(dir) = replay_dir {
        FileReplayReader::new(&dir).read_into(&store)?;
    }

    if let Some(url) = feed_url {
        let client = Arc::new(FeedClient::new(url, store.clone()));
        let runner = client.clone();
        tokio::spawn(async move { runner.run().await });
    }

    spawn_signal_task(SaturationGenerator::new(), FAST_SIGNAL_PERIOD, patient_count, sinks.clone());
    spawn_signal_task(HeartRateGenerator::new(), FAST_SIGNAL_PERIOD, patient_count, sinks.clone());
    spawn_signal_task(CardiacRhythmGenerator::new(), FAST_SIGNAL_PERIOD, patient_count, sinks.clone());
    spawn_signal_task(PressureGenerator::new(), PRESSURE_PERIOD, patient_count, sinks.clone());
    spawn_signal_task(ManualAlertGenerator::new(), MANUAL_ALERT_PERIOD, patient_count, sinks.clone());

    // One evaluation task per patient. A panic in one patient's evaluation
    // kills only that task.
    for patient_id in 1..=patient_count {
        let evaluator = evaluator.clone();
        let jitter = rand::thread_rng().gen_range(0..5000);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(jitter)).await;
            let mut tick = tokio::time::interval(Duration::from_secs(eval_period_secs));
            loop {
                tick.tick().await;
                evaluator.evaluate_patient(patient_id);
            }
        });
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}

/// One task per signal type: every tick, emit a fresh reading for every
/// patient to every sink. Start is jittered so signals do not fire in
/// lockstep.
fn spawn_signal_task<G>(
    mut generator: G,
    period: Duration,
    patient_count: u32,
    sinks: Vec<Arc<dyn OutputSink>>,
) where
    G: VitalGenerator + 'static,
{
    let jitter = rand::thread_rng().gen_range(0..5000);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(jitter)).await;
        let mut tick = tokio::time::interval(period);
        loop {
            tick.tick().await;
            for patient_id in 1..=patient_count {
                let Some(value) = generator.generate(patient_id) else {
                    continue;
                };
                let timestamp = Utc::now().timestamp_millis();
                for sink in &sinks {
                    sink.emit(patient_id, timestamp, generator.label(), &value);
                }
            }
        }
    });
}

/// `--flag value` lookup, parsed; `None` when absent or unparseable.
fn flag_value<T: std::str::FromStr>(args: &[String], name: &str) -> Option<T> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
