//! Estimated flight statistics.
//!
//! Aggregates the position, attitude, RPM, servo and battery datasets of a
//! flight log into the summary numbers shown in the report header: total
//! distance, altitude range, speed, tilt angle and battery figures. Every
//! statistic is optional; a log without the backing dataset simply yields
//! `None` for that statistic.

use crate::models::log::{Dataset, FlightLog};
use crate::models::mode::ModeTransition;
use crate::services::mode_stats::{reduce_per_mode, PerModeStats};
use serde::{Deserialize, Serialize};

/// Mean and max of a sampled quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueStats {
    pub mean: f64,
    pub max: f64,
}

/// A statistic that is reported per VTOL mode when a mode timeline exists,
/// or as a single overall aggregate otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ModeSplitStats {
    Overall(ValueStats),
    PerMode(PerModeStats),
}

/// Battery figures for one battery instance. Only produced when the mean
/// current exceeds 1 A (idle batteries are not reported).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryStats {
    pub instance: usize,
    pub current_a: ModeSplitStats,
    pub begin_voltage_v: f64,
    pub end_voltage_v: f64,
}

/// All estimated flight statistics of a log.
///
/// Values are in SI units (meters, meters per second, degrees, amperes,
/// volts); unit conversion for display belongs to the formatting layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightStats {
    pub total_distance_m: Option<f64>,
    pub max_altitude_difference_m: Option<f64>,
    pub speed_m_s: Option<ModeSplitStats>,
    pub tilt_angle_deg: Option<ValueStats>,
    pub rpm: Option<ValueStats>,
    pub servo_force_n: Option<ValueStats>,
    pub batteries: Vec<BatteryStats>,
}

/// Compute all estimated flight statistics for a log.
///
/// Speed and battery current are split per VTOL mode when the log carries a
/// mode transition timeline.
pub fn compute_flight_stats(log: &FlightLog) -> FlightStats {
    let transitions = log.vtol_transitions.as_deref();
    let mut stats = FlightStats::default();

    if let Some(local_pos) = log.dataset("vehicle_local_position") {
        compute_position_stats(local_pos, transitions, &mut stats);
    }

    if let Some(attitude) = log.dataset("vehicle_attitude") {
        stats.tilt_angle_deg = compute_tilt_stats(attitude);
    }

    stats.rpm = log
        .dataset("rpm")
        .and_then(|ds| ds.field("electrical_speed_rpm[4]"))
        .and_then(mean_max);

    stats.servo_force_n = log
        .dataset("servo_status")
        .and_then(|ds| ds.field("servo[0].servo_force"))
        .and_then(mean_max);

    for instance in 0..log.instance_count("battery_status") {
        if let Some(battery) = log
            .dataset_instance("battery_status", instance)
            .and_then(|ds| compute_battery_stats(ds, instance, transitions))
        {
            stats.batteries.push(battery);
        }
    }

    stats
}

fn compute_position_stats(
    local_pos: &Dataset,
    transitions: Option<&[ModeTransition]>,
    stats: &mut FlightStats,
) {
    // Distance over consecutive position-valid samples.
    if let (Some(x), Some(y), Some(z), Some(xy_valid), Some(z_valid)) = (
        local_pos.field("x"),
        local_pos.field("y"),
        local_pos.field("z"),
        local_pos.field("xy_valid"),
        local_pos.field("z_valid"),
    ) {
        stats.total_distance_m = Some(total_distance(x, y, z, xy_valid, z_valid));
        if !z.is_empty() {
            let z_max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let z_min = z.iter().cloned().fold(f64::INFINITY, f64::min);
            stats.max_altitude_difference_m = Some(z_max - z_min);
        }
    }

    // 3D speed over velocity-valid samples.
    if let (Some(vx), Some(vy), Some(vz), Some(v_xy_valid), Some(v_z_valid)) = (
        local_pos.field("vx"),
        local_pos.field("vy"),
        local_pos.field("vz"),
        local_pos.field("v_xy_valid"),
        local_pos.field("v_z_valid"),
    ) {
        let mut speeds = Vec::new();
        let mut speed_timestamps = Vec::new();
        for i in 0..vx.len().min(vy.len()).min(vz.len()) {
            if v_xy_valid[i] * v_z_valid[i] > 0.0 {
                speeds.push((vx[i] * vx[i] + vy[i] * vy[i] + vz[i] * vz[i]).sqrt());
                speed_timestamps.push(local_pos.timestamps[i]);
            }
        }
        if !speeds.is_empty() {
            stats.speed_m_s = Some(mode_split(&speed_timestamps, &speeds, transitions));
        }
    }
}

/// Sum of 3D segment lengths over consecutive valid samples. A gap in the
/// valid indices breaks the chain; the segment across it is not counted.
fn total_distance(x: &[f64], y: &[f64], z: &[f64], xy_valid: &[f64], z_valid: &[f64]) -> f64 {
    let n = x.len().min(y.len()).min(z.len()).min(xy_valid.len()).min(z_valid.len());
    let mut total = 0.0;
    let mut last_index: Option<usize> = None;

    for i in 0..n {
        if xy_valid[i] * z_valid[i] <= 0.0 {
            continue;
        }
        if let Some(last) = last_index {
            if i == last + 1 {
                let dx = x[i] - x[last];
                let dy = y[i] - y[last];
                let dz = z[i] - z[last];
                total += (dx * dx + dy * dy + dz * dz).sqrt();
            }
        }
        last_index = Some(i);
    }

    total
}

fn compute_tilt_stats(attitude: &Dataset) -> Option<ValueStats> {
    let roll = attitude.field("roll")?;
    let pitch = attitude.field("pitch")?;

    // Tilt = angle between the body z axis and vertical, from roll/pitch.
    let tilt: Vec<f64> = roll
        .iter()
        .zip(pitch.iter())
        .map(|(&r, &p)| (p.cos() * r.cos()).clamp(-1.0, 1.0).acos().to_degrees())
        .collect();

    mean_max(&tilt)
}

fn compute_battery_stats(
    battery: &Dataset,
    instance: usize,
    transitions: Option<&[ModeTransition]>,
) -> Option<BatteryStats> {
    let current = battery.field("current_a")?;
    let voltage = battery.field("voltage_v")?;
    let overall = mean_max(current)?;
    if overall.mean <= 1.0 {
        return None;
    }

    Some(BatteryStats {
        instance,
        current_a: mode_split(&battery.timestamps, current, transitions),
        begin_voltage_v: *voltage.first()?,
        end_voltage_v: *voltage.last()?,
    })
}

fn mode_split(
    timestamps: &[u64],
    values: &[f64],
    transitions: Option<&[ModeTransition]>,
) -> ModeSplitStats {
    match transitions {
        Some(transitions) => {
            ModeSplitStats::PerMode(reduce_per_mode(timestamps, values, transitions))
        }
        // mean_max is only reached with non-empty values here
        None => ModeSplitStats::Overall(mean_max(values).unwrap_or(ValueStats {
            mean: 0.0,
            max: 0.0,
        })),
    }
}

fn mean_max(values: &[f64]) -> Option<ValueStats> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some(ValueStats { mean, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::log::Dataset;
    use crate::models::mode::{FlightMode, ModeTransition};

    fn dataset(name: &str, timestamps: Vec<u64>, fields: &[(&str, Vec<f64>)]) -> Dataset {
        Dataset {
            name: name.to_string(),
            instance: 0,
            timestamps,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn local_position_log() -> FlightLog {
        let n = 4;
        FlightLog {
            datasets: vec![dataset(
                "vehicle_local_position",
                vec![0, 1, 2, 3],
                &[
                    ("x", vec![0.0, 3.0, 3.0, 6.0]),
                    ("y", vec![0.0, 4.0, 4.0, 8.0]),
                    ("z", vec![0.0, 0.0, -10.0, 0.0]),
                    ("xy_valid", vec![1.0; n]),
                    ("z_valid", vec![1.0; n]),
                    ("vx", vec![3.0, 0.0, 0.0, 4.0]),
                    ("vy", vec![4.0, 0.0, 0.0, 3.0]),
                    ("vz", vec![0.0, 0.0, 0.0, 0.0]),
                    ("v_xy_valid", vec![1.0; n]),
                    ("v_z_valid", vec![1.0; n]),
                ],
            )],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_log_yields_no_stats() {
        let stats = compute_flight_stats(&FlightLog::default());
        assert_eq!(stats, FlightStats::default());
        assert!(stats.total_distance_m.is_none());
        assert!(stats.speed_m_s.is_none());
        assert!(stats.batteries.is_empty());
    }

    #[test]
    fn test_total_distance_consecutive_segments() {
        let stats = compute_flight_stats(&local_position_log());
        // 0->1: 3-4-5 triangle, 1->2: 10 m climb, 2->3: sqrt(9+16+100)
        let expected = 5.0 + 10.0 + (9.0f64 + 16.0 + 100.0).sqrt();
        assert!((stats.total_distance_m.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_distance_chain_breaks_at_invalid_sample() {
        let mut log = local_position_log();
        log.datasets[0]
            .fields
            .insert("xy_valid".to_string(), vec![1.0, 0.0, 1.0, 1.0]);
        let stats = compute_flight_stats(&log);
        // Only the 2->3 segment survives: 0->1 and 1->2 touch the invalid
        // sample, and 0->2 is not consecutive.
        let expected = (9.0f64 + 16.0 + 100.0).sqrt();
        assert!((stats.total_distance_m.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_max_altitude_difference() {
        let stats = compute_flight_stats(&local_position_log());
        assert!((stats.max_altitude_difference_m.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_speed() {
        let stats = compute_flight_stats(&local_position_log());
        match stats.speed_m_s.unwrap() {
            ModeSplitStats::Overall(speed) => {
                // Speeds: 5, 0, 0, 5
                assert!((speed.mean - 2.5).abs() < 1e-9);
                assert!((speed.max - 5.0).abs() < 1e-9);
            }
            other => panic!("expected overall speed, got {:?}", other),
        }
    }

    #[test]
    fn test_per_mode_speed_with_vtol_timeline() {
        let mut log = local_position_log();
        log.vtol_transitions = Some(vec![
            ModeTransition::new(0u64, FlightMode::Multicopter),
            ModeTransition::new(2u64, FlightMode::FixedWing),
        ]);
        let stats = compute_flight_stats(&log);
        match stats.speed_m_s.unwrap() {
            ModeSplitStats::PerMode(per_mode) => {
                assert_eq!(per_mode.multicopter.count, 2);
                assert_eq!(per_mode.multicopter.mean, Some(2.5));
                assert_eq!(per_mode.fixed_wing.count, 2);
                assert_eq!(per_mode.fixed_wing.mean, Some(2.5));
                assert_eq!(per_mode.fixed_wing.max, 5.0);
            }
            other => panic!("expected per-mode speed, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_velocity_samples_excluded() {
        let mut log = local_position_log();
        log.datasets[0]
            .fields
            .insert("v_xy_valid".to_string(), vec![1.0, 1.0, 1.0, 0.0]);
        let stats = compute_flight_stats(&log);
        match stats.speed_m_s.unwrap() {
            ModeSplitStats::Overall(speed) => {
                assert!((speed.mean - 5.0 / 3.0).abs() < 1e-9);
            }
            other => panic!("expected overall speed, got {:?}", other),
        }
    }

    #[test]
    fn test_tilt_angle() {
        let log = FlightLog {
            datasets: vec![dataset(
                "vehicle_attitude",
                vec![0, 1],
                &[
                    ("roll", vec![0.0, 0.0]),
                    ("pitch", vec![0.0, std::f64::consts::FRAC_PI_2]),
                ],
            )],
            ..Default::default()
        };
        let stats = compute_flight_stats(&log);
        let tilt = stats.tilt_angle_deg.unwrap();
        assert!((tilt.max - 90.0).abs() < 1e-9);
        assert!((tilt.mean - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_rpm_and_servo_force() {
        let log = FlightLog {
            datasets: vec![
                dataset(
                    "rpm",
                    vec![0, 1],
                    &[("electrical_speed_rpm[4]", vec![1000.0, 3000.0])],
                ),
                dataset(
                    "servo_status",
                    vec![0, 1],
                    &[("servo[0].servo_force", vec![2.0, 4.0])],
                ),
            ],
            ..Default::default()
        };
        let stats = compute_flight_stats(&log);
        assert_eq!(
            stats.rpm,
            Some(ValueStats {
                mean: 2000.0,
                max: 3000.0
            })
        );
        assert_eq!(
            stats.servo_force_n,
            Some(ValueStats {
                mean: 3.0,
                max: 4.0
            })
        );
    }

    #[test]
    fn test_battery_stats() {
        let log = FlightLog {
            datasets: vec![dataset(
                "battery_status",
                vec![0, 1, 2],
                &[
                    ("current_a", vec![4.0, 8.0, 6.0]),
                    ("voltage_v", vec![16.8, 16.0, 14.9]),
                ],
            )],
            ..Default::default()
        };
        let stats = compute_flight_stats(&log);
        assert_eq!(stats.batteries.len(), 1);
        let battery = &stats.batteries[0];
        assert_eq!(battery.instance, 0);
        assert_eq!(battery.begin_voltage_v, 16.8);
        assert_eq!(battery.end_voltage_v, 14.9);
        match battery.current_a {
            ModeSplitStats::Overall(current) => {
                assert!((current.mean - 6.0).abs() < 1e-9);
                assert_eq!(current.max, 8.0);
            }
            other => panic!("expected overall current, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_battery_not_reported() {
        let log = FlightLog {
            datasets: vec![dataset(
                "battery_status",
                vec![0, 1],
                &[
                    ("current_a", vec![0.5, 0.3]),
                    ("voltage_v", vec![16.8, 16.8]),
                ],
            )],
            ..Default::default()
        };
        let stats = compute_flight_stats(&log);
        assert!(stats.batteries.is_empty());
    }

    #[test]
    fn test_multiple_battery_instances() {
        let mut second = dataset(
            "battery_status",
            vec![0, 1],
            &[
                ("current_a", vec![10.0, 12.0]),
                ("voltage_v", vec![25.2, 24.0]),
            ],
        );
        second.instance = 1;
        let log = FlightLog {
            datasets: vec![
                dataset(
                    "battery_status",
                    vec![0, 1],
                    &[
                        ("current_a", vec![4.0, 6.0]),
                        ("voltage_v", vec![16.8, 15.0]),
                    ],
                ),
                second,
            ],
            ..Default::default()
        };
        let stats = compute_flight_stats(&log);
        assert_eq!(stats.batteries.len(), 2);
        assert_eq!(stats.batteries[1].instance, 1);
        assert_eq!(stats.batteries[1].begin_voltage_v, 25.2);
    }

    #[test]
    fn test_mean_max_empty() {
        assert!(mean_max(&[]).is_none());
    }
}
