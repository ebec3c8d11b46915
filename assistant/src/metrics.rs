use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared_types::{Availability, DerivedSnapshot, ScheduledProject, StatusCount};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::store::Records;

/// Limits used to classify projects and members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    /// Deadlines from today up to this many days ahead are urgent
    pub urgent_within_days: i64,
    /// A member with at least this many active projects is overloaded
    pub overload_at: u32,
    pub busy_portfolio_above: usize,
    pub terminal_statuses: Vec<String>,
    pub in_progress_status: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            urgent_within_days: 3,
            overload_at: 2,
            busy_portfolio_above: 5,
            terminal_statuses: vec!["Terminé".to_string(), "Done".to_string()],
            in_progress_status: "En cours".to_string(),
        }
    }
}

pub struct MetricsCalculator {
    thresholds: Thresholds,
}

impl MetricsCalculator {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Derive every fact the renderer needs. Total over any record set.
    pub fn snapshot(&self, records: &Records, today: NaiveDate) -> DerivedSnapshot {
        let thresholds = &self.thresholds;

        let in_progress_projects = records
            .projects
            .iter()
            .filter(|p| p.has_status(&thresholds.in_progress_status))
            .count();

        let mut overdue = Vec::new();
        let mut urgent = Vec::new();
        for project in &records.projects {
            if self.is_terminal(&project.status) {
                continue;
            }
            let Some(days_remaining) = project.days_until_deadline(today) else {
                continue;
            };

            let scheduled = ScheduledProject {
                project: project.clone(),
                days_remaining,
            };
            if days_remaining < 0 {
                overdue.push(scheduled);
            } else if days_remaining <= thresholds.urgent_within_days {
                urgent.push(scheduled);
            }
        }
        // Most late first, then closest deadline first
        overdue.sort_by_key(|s| s.days_remaining);
        urgent.sort_by_key(|s| s.days_remaining);

        let available_members = records
            .members
            .iter()
            .filter(|m| m.availability == Availability::Available)
            .cloned()
            .collect();

        let overloaded_members: Vec<_> = records
            .members
            .iter()
            .filter(|m| m.active_projects >= thresholds.overload_at)
            .cloned()
            .collect();

        let suggestions = self.suggestions(
            overdue.len(),
            urgent.len(),
            overloaded_members.len(),
            in_progress_projects,
        );

        DerivedSnapshot {
            today,
            urgent_within_days: thresholds.urgent_within_days,
            total_projects: records.projects.len(),
            total_members: records.members.len(),
            in_progress_projects,
            available_members,
            overdue,
            urgent,
            overloaded_members,
            status_histogram: status_histogram(records),
            average_completion: average_completion(records),
            suggestions,
        }
    }

    fn is_terminal(&self, status: &str) -> bool {
        let status = status.trim().to_lowercase();
        self.thresholds
            .terminal_statuses
            .iter()
            .any(|terminal| terminal.trim().to_lowercase() == status)
    }

    fn suggestions(
        &self,
        overdue: usize,
        urgent: usize,
        overloaded: usize,
        in_progress: usize,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        if overdue > 0 {
            suggestions.push(format!(
                "⚠️ {} projet(s) en retard nécessitent une attention immédiate",
                overdue
            ));
        }
        if urgent > 0 {
            suggestions.push(format!(
                "🚨 {} projet(s) avec échéance dans les {} jours",
                urgent, self.thresholds.urgent_within_days
            ));
        }
        if overloaded > 0 {
            suggestions.push(format!(
                "👥 {} membre(s) de l'équipe surchargé(s) - considérer une redistribution",
                overloaded
            ));
        }
        if in_progress > self.thresholds.busy_portfolio_above {
            suggestions.push(format!(
                "📊 {} projets en cours - vérifier la capacité de l'équipe",
                in_progress
            ));
        }

        suggestions
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

fn status_histogram(records: &Records) -> Vec<StatusCount> {
    let mut histogram: Vec<StatusCount> = Vec::new();
    for project in &records.projects {
        let status = match project.status.trim() {
            "" => "Non défini",
            other => other,
        };
        match histogram.iter_mut().find(|entry| entry.status == status) {
            Some(entry) => entry.count += 1,
            None => histogram.push(StatusCount {
                status: status.to_string(),
                count: 1,
            }),
        }
    }
    histogram
}

fn average_completion(records: &Records) -> u8 {
    if records.projects.is_empty() {
        return 0;
    }
    let total: u32 = records.projects.iter().map(|p| p.completion as u32).sum();
    let average = (total as f64 / records.projects.len() as f64).round();
    average.clamp(0.0, 100.0) as u8
}

struct CachedSnapshot {
    generation: u64,
    today: NaiveDate,
    computed_at: DateTime<Utc>,
    snapshot: Arc<DerivedSnapshot>,
}

/// Keeps the last snapshot until it expires, the records change or the date rolls over
pub struct SnapshotCache {
    ttl: Duration,
    entry: Mutex<Option<CachedSnapshot>>,
}

impl SnapshotCache {
    /// A zero TTL disables caching
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs.min(u32::MAX as u64) as i64),
            entry: Mutex::new(None),
        }
    }

    pub async fn get_or_compute<F>(
        &self,
        generation: u64,
        today: NaiveDate,
        compute: F,
    ) -> Arc<DerivedSnapshot>
    where
        F: FnOnce() -> DerivedSnapshot,
    {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            let fresh = Utc::now() < cached.computed_at + self.ttl;
            if fresh && cached.generation == generation && cached.today == today {
                return cached.snapshot.clone();
            }
        }

        let snapshot = Arc::new(compute());
        *entry = Some(CachedSnapshot {
            generation,
            today,
            computed_at: Utc::now(),
            snapshot: snapshot.clone(),
        });
        snapshot
    }
}
