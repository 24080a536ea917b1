use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use gro_ats::config::AppConfig;
use gro_ats::error::AppError;
use gro_ats::recruiting::{
    evaluate_sponsorship, recruiting_router, score_profile, CandidateProfile, CareersPublisher,
};
use gro_ats::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "GRO ATS",
    about = "Run the GRO Early Learning applicant tracking service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a candidate profile JSON file and print both rubrics
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Path to a candidate profile JSON document
    profile: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score(args) => run_score_demo(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let store = Arc::new(gro_ats::recruiting::MemoryStore::default());
    let notifier = Arc::new(MailLogNotifier {
        from_address: config.notifications.from_address.clone(),
    });
    let careers_transport = Arc::new(CareersLogTransport);
    let careers = CareersPublisher::new(
        config.careers_webhook.endpoint.clone(),
        config.careers_webhook.secret.clone(),
    );
    let careers_mirror = careers.enabled();
    let service = Arc::new(gro_ats::recruiting::RecruitingService::new(
        store,
        notifier,
        careers_transport,
        careers,
    ));

    let ops = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let app = recruiting_router(service)
        .merge(ops)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        careers_mirror,
        "applicant tracking service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score_demo(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.profile)?;
    let profile: CandidateProfile = serde_json::from_str(&raw)?;

    let breakdown = score_profile(&profile);
    let verdict = evaluate_sponsorship(&profile);

    println!("Candidate scoring demo");
    println!("\nFitness rubric");
    for component in &breakdown.components {
        println!(
            "- {:?}: {:+.1} ({})",
            component.factor, component.points, component.notes
        );
    }
    println!("Total: {:.1}/10", breakdown.total);

    println!("\nSponsorship");
    println!("- eligible: {}", if verdict.eligible { "yes" } else { "no" });
    println!("- reason: {}", verdict.reason);
    match &verdict.visa_pathway {
        Some(pathway) => println!("- pathway: {pathway}"),
        None => println!("- pathway: none"),
    }
    if verdict.requirements.is_empty() {
        println!("- requirements: none");
    } else {
        println!("- requirements:");
        for requirement in &verdict.requirements {
            println!("  - {requirement}");
        }
    }
    println!("- sub-score: {}/12", verdict.score);

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Mail hook for single-process deployments: the provider integration is
/// external, so outbound mail is logged for the demo environment.
struct MailLogNotifier {
    from_address: String,
}

impl gro_ats::recruiting::Notifier for MailLogNotifier {
    fn send(
        &self,
        message: gro_ats::recruiting::EmailMessage,
    ) -> Result<(), gro_ats::recruiting::NotifyError> {
        info!(
            from = %self.from_address,
            to = %message.to,
            subject = %message.subject,
            "outbound candidate mail"
        );
        Ok(())
    }
}

/// Careers-site hop for single-process deployments; logs the signed delivery.
struct CareersLogTransport;

impl gro_ats::recruiting::CareersTransport for CareersLogTransport {
    fn deliver(
        &self,
        delivery: gro_ats::recruiting::SignedDelivery,
    ) -> Result<(), gro_ats::recruiting::WebhookError> {
        info!(
            endpoint = %delivery.endpoint,
            signature = %delivery.signature,
            bytes = delivery.body.len(),
            "careers webhook delivery"
        );
        Ok(())
    }
}
