//! Prometheus text exposition of the world metrics.

use ameba_world::MetricsSnapshot;
use std::fmt::Write;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

enum Kind {
    Gauge,
    Counter,
}

impl Kind {
    fn as_str(&self) -> &'static str {
        match self {
            Kind::Gauge => "gauge",
            Kind::Counter => "counter",
        }
    }
}

fn write_metric(out: &mut String, name: &str, help: &str, kind: Kind, value: impl std::fmt::Display) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {}", kind.as_str());
    let _ = writeln!(out, "{name} {value}");
}

pub fn render(metrics: &MetricsSnapshot) -> String {
    let mut out = String::new();
    write_metric(&mut out, "ameba_population", "Current population", Kind::Gauge, metrics.population.total);
    write_metric(
        &mut out,
        "ameba_avg_energy",
        "Average organism energy",
        Kind::Gauge,
        format!("{:.6}", metrics.population.avg_energy()),
    );
    write_metric(&mut out, "ameba_births", "Total births", Kind::Counter, metrics.births);
    write_metric(&mut out, "ameba_deaths", "Total deaths", Kind::Counter, metrics.deaths);
    write_metric(&mut out, "ameba_tick", "Current tick", Kind::Gauge, metrics.tick);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ameba_core::PopulationStats;
    use ameba_world::Tunables;

    #[test]
    fn test_render_exposition() {
        let population: PopulationStats = vec![(1.0, 10.0, false), (0.5, 9.0, false), (0.0, 8.0, true)]
            .into_iter()
            .collect();
        let metrics = MetricsSnapshot {
            tick: 42,
            births: 3,
            deaths: 1,
            foods: 7,
            population,
            tunables: Tunables {
                food_spawn_prob: 0.15,
                reproduction_base_chance: 0.12,
                world_width: 2000.0,
                world_height: 2000.0,
            },
        };

        let text = render(&metrics);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "# HELP ameba_population Current population");
        assert_eq!(lines[1], "# TYPE ameba_population gauge");
        assert_eq!(lines[2], "ameba_population 3");
        assert_eq!(lines[5], "ameba_avg_energy 0.500000");
        assert_eq!(lines[7], "# TYPE ameba_births counter");
        assert_eq!(lines[8], "ameba_births 3");
        assert_eq!(lines[11], "ameba_deaths 1");
        assert_eq!(lines[14], "ameba_tick 42");
    }
}
