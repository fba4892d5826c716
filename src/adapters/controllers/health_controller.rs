use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    #[serde(rename = "defaultFolder")]
    pub default_folder: String,
    #[serde(rename = "passwordProtected")]
    pub password_protected: bool,
    #[serde(rename = "uptimeSeconds")]
    pub uptime_seconds: i64,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

impl SystemMetrics {
    fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Self {
            cpu_usage_percent: sys.global_cpu_usage(),
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        }
    }
}

pub struct HealthController;

impl HealthController {
    /// GET /api/v1/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        info!("Health check requested");

        Json(HealthResponse {
            status: "healthy".to_string(),
            provider: app_state.local_config.provider.to_string(),
            default_folder: app_state.local_config.default_folder.clone(),
            password_protected: app_state.secrets.access_password.is_some(),
            uptime_seconds: (Utc::now() - app_state.started_at).num_seconds(),
            metrics: SystemMetrics::collect(),
        })
    }
}
