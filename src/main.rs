use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnup::api::{self, ResourceBackend};
use learnup::cli::{Cli, Command};
use learnup::config::AppConfig;
use learnup::controllers::ResourceList;
use learnup::error::{AppError, Operation};
use learnup::models::Course;
use learnup::services::RefreshScheduler;
use learnup::state::{Action, AppState};
use learnup::stats;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "learnup=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = AppConfig::new_from_env()?;
    let state = AppState::init(config).await?;

    match cli.command {
        Command::Login {
            role,
            email,
            password,
        } => {
            let user = state
                .api
                .login(role, &email, &password)
                .await
                .map_err(|e| {
                    eprintln!("{}", e.user_message(Operation::Login));
                    e
                })?;
            println!(
                "Connecté: {} {} ({})",
                user.profile.first_name, user.profile.last_name, user.role
            );
        }
        Command::Logout => state.dispatch(Action::Logout).await?,
        Command::Courses { watch } => courses(&state, watch).await?,
        Command::Grades { student_id, window } => grades(&state, &student_id, window).await?,
        Command::Absences { student_id } => absences(&state, &student_id).await?,
        Command::Rappels => rappels(&state).await?,
    }

    Ok(())
}

fn print_courses(list: &ResourceList<Course>) {
    if let Some(error) = list.error() {
        eprintln!("{}", error);
    }
    for course in list.view() {
        println!(
            "{:<28} {:<10} {:<16} {}",
            course.name,
            course.class_label,
            course.subject_name().unwrap_or("-"),
            course.teacher_name().unwrap_or_else(|| "-".to_string()),
        );
    }
}

async fn courses(state: &AppState, watch: bool) -> Result<(), AppError> {
    let backend = Arc::new(api::courses(&state.api));

    if !watch {
        let mut list = ResourceList::<Course>::new();
        list.load(&*backend).await;
        print_courses(&list);
        return Ok(());
    }

    let list = Arc::new(RwLock::new(ResourceList::<Course>::new()));
    let scheduler =
        RefreshScheduler::<Course>::new(backend, list.clone(), state.config.poll_interval)
            .with_bus(state.bus.clone());
    let mut task = tokio::spawn(scheduler.start());

    let mut ticker = tokio::time::interval(state.config.poll_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => print_courses(&*list.read().await),
            _ = tokio::signal::ctrl_c() => {
                info!("stopping watch");
                task.abort();
                break;
            }
            _ = &mut task => break,
        }
    }
    Ok(())
}

async fn grades(state: &AppState, student_id: &str, window: usize) -> Result<(), AppError> {
    let notes = api::student_notes(&state.api, student_id).list().await?;
    let report = stats::aggregate_grades(&notes, window);
    for (subject, s) in &report.by_subject {
        println!(
            "{:<20} n={:<3} moy={:>5.2} max={:>5.2} min={:>5.2} {:?} {}",
            subject, s.count, s.average, s.max, s.min, s.trend, s.band
        );
    }
    match &report.overall {
        Some(s) => println!("Moyenne générale: {:.2} ({}, {:?})", s.average, s.band, s.trend),
        None => println!("Aucune note"),
    }
    Ok(())
}

async fn absences(state: &AppState, student_id: &str) -> Result<(), AppError> {
    let list = api::student_absences(&state.api, student_id).list().await?;
    let summary = stats::summarize_absences(&list);
    println!(
        "Absences: {} (justifiées {}, non justifiées {}, taux {:.2}%)",
        summary.total, summary.justified, summary.unjustified, summary.justification_rate
    );
    for (subject, count) in &summary.by_subject {
        println!("  {:<20} {}", subject, count);
    }
    Ok(())
}

async fn rappels(state: &AppState) -> Result<(), AppError> {
    let list = api::rappels(&state.api).list().await?;
    let summary = stats::summarize_reminders(&list, Local::now().date_naive());
    println!(
        "Rappels: {} actifs, {} terminés, {} en retard, {} à venir",
        summary.active, summary.done, summary.overdue, summary.due_soon
    );
    Ok(())
}
