// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

pub const RATINGS_SUBMITTED_TOTAL: &str = "norskball_ratings_submitted_total";
pub const SCRAPER_PLAYERS_CREATED_TOTAL: &str = "norskball_scraper_players_created_total";
pub const SCRAPER_PLAYERS_UPDATED_TOTAL: &str = "norskball_scraper_players_updated_total";
pub const SCRAPER_RUNS_TOTAL: &str = "norskball_scraper_runs_total";

/// 安装 Prometheus 记录器
///
/// 返回的句柄用于在 `/metrics` 渲染文本格式指标
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    info!("Prometheus recorder installed");
    Ok(handle)
}

fn describe_metrics() {
    describe_counter!(RATINGS_SUBMITTED_TOTAL, "Ratings created or updated by users");
    describe_counter!(
        SCRAPER_PLAYERS_CREATED_TOTAL,
        "Players created by the roster scraper"
    );
    describe_counter!(
        SCRAPER_PLAYERS_UPDATED_TOTAL,
        "Players updated by the roster scraper"
    );
    describe_counter!(SCRAPER_RUNS_TOTAL, "Roster sync runs by outcome");
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::counter;

    #[test]
    fn test_counters_render() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            counter!(RATINGS_SUBMITTED_TOTAL).increment(2);
            counter!(SCRAPER_RUNS_TOTAL, "outcome" => "success").increment(1);
        });

        let rendered = handle.render();
        assert!(rendered.contains("norskball_ratings_submitted_total 2"));
        assert!(rendered.contains("norskball_scraper_runs_total{outcome=\"success\"} 1"));
    }
}
