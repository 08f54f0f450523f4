//! Report summary table.
//!
//! Assembles the ordered label/value rows describing a flight log: vehicle
//! identity, versions, timing, and the estimated flight statistics. The
//! result is returned to the caller; the export layer renders the same rows
//! as an HTML table, CSV `name,value` pairs, or PDF lines.

use crate::models::log::FlightLog;
use crate::models::time::{format_duration_hms, format_duration_verbose, LogTimestamp};
use crate::services::flight_stats::{FlightStats, ModeSplitStats};
use crate::services::mode_stats::ModeAggregate;
use serde::{Deserialize, Serialize};

/// One label/value row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// The full, ordered summary of a flight log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub rows: Vec<SummaryRow>,
}

impl ReportSummary {
    fn push(&mut self, label: &str, value: impl Into<String>) {
        self.rows.push(SummaryRow {
            label: label.to_string(),
            value: value.into(),
        });
    }

    /// Value of the first row with the given label, for lookups.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// Build the summary rows for a log and its precomputed flight statistics.
pub fn build_report_summary(log: &FlightLog, stats: &FlightStats) -> ReportSummary {
    let mut summary = ReportSummary::default();

    if let Some(airframe_id) = log.initial_parameters.get("SYS_AUTOSTART") {
        summary.push("Airframe ID", format!("{}", *airframe_id as i64));
    }

    if let Some(hardware) = hardware_string(log) {
        summary.push("Hardware", hardware);
    }

    if let Some(ver_sw) = log.msg_info.get("ver_sw") {
        let short_hash: String = ver_sw.chars().take(8).collect();
        let version = match log.msg_info.get("ver_sw_branch") {
            Some(branch) => format!("{}, {}", short_hash, branch),
            None => short_hash,
        };
        summary.push("Software Version", version);
    }

    if let (Some(os_name), Some(os_ver)) = (
        log.msg_info.get("sys_os_name"),
        log.msg_info.get("sys_os_ver_release"),
    ) {
        summary.push("OS Version", format!("{}, {}", os_name, os_ver));
    }

    if let Some(estimator) = estimator_name(log) {
        summary.push("Estimator", estimator);
    }

    if let Some(start) = logging_start_utc(log) {
        summary.push("Logging Start", start);
    }

    summary.push(
        "Logging Duration",
        format_duration_hms(log.logging_duration_secs()),
    );

    if !log.dropout_durations_ms.is_empty() {
        let total_s = log.dropout_durations_ms.iter().sum::<u64>() as f64 / 1000.0;
        let total_str = if total_s > 5.0 {
            format!("{:.0}", total_s)
        } else {
            format!("{:.2}", total_s)
        };
        summary.push(
            "Dropouts",
            format!("{} ({} s)", log.dropout_durations_ms.len(), total_str),
        );
    }

    if let Some(flight_time_s) = total_flight_time_secs(log) {
        summary.push(
            "Vehicle Life Flight Time",
            format_duration_verbose(flight_time_s),
        );
    }

    if let Some(uuid) = vehicle_uuid(log) {
        summary.push("Vehicle UUID", uuid);
    }

    push_stats_rows(&mut summary, stats);
    summary
}

fn hardware_string(log: &FlightLog) -> Option<String> {
    let hw = log.msg_info.get("ver_hw")?;
    Some(match log.msg_info.get("ver_hw_subtype") {
        Some(subtype) => format!("{} ({})", hw, subtype),
        None => hw.clone(),
    })
}

fn estimator_name(log: &FlightLog) -> Option<&'static str> {
    let group = *log.initial_parameters.get("SYS_MC_EST_GROUP")? as i64;
    match group {
        0 => Some("INAV"),
        1 => Some("LPE"),
        2 => Some("EKF2"),
        _ => None,
    }
}

/// Logging start time in UTC, from the first nonzero GPS timestamp with the
/// log's configured UTC offset applied.
fn logging_start_utc(log: &FlightLog) -> Option<String> {
    let gps = log.dataset("vehicle_gps_position")?;
    let time_utc_usec = gps.field("time_utc_usec")?;
    let first_nonzero = time_utc_usec.iter().find(|&&t| t > 0.0)?;

    let start_secs = (*first_nonzero / 1e6) as i64;
    let offset_min = log
        .initial_parameters
        .get("SDLOG_UTC_OFFSET")
        .copied()
        .unwrap_or(0.0) as i64;
    let shifted = start_secs.checked_add(offset_min * 60)?;
    if shifted < 0 {
        return None;
    }

    let datetime = LogTimestamp::new(shifted as u64 * 1_000_000).to_datetime();
    Some(datetime.format("%d-%m-%Y %H:%M").to_string())
}

/// Vehicle lifetime flight time from the landing detector's persistent
/// counter parameters, split across two 32 bit halves.
fn total_flight_time_secs(log: &FlightLog) -> Option<u64> {
    let hi = *log.initial_parameters.get("LND_FLIGHT_T_HI")? as u64;
    let lo = *log.initial_parameters.get("LND_FLIGHT_T_LO")? as u64;
    let total_us = (hi << 32) | (lo & 0xffff_ffff);
    Some(total_us / 1_000_000)
}

/// Vehicle UUID row; simulation targets log a placeholder UUID, so it is
/// suppressed for SITL hardware.
fn vehicle_uuid(log: &FlightLog) -> Option<String> {
    let uuid = log.msg_info.get("sys_uuid")?;
    let hardware = log.msg_info.get("ver_hw").map(String::as_str).unwrap_or("");
    if uuid.is_empty() || hardware == "SITL" || hardware == "PX4_SITL" {
        return None;
    }
    Some(uuid.clone())
}

const M_S_TO_KM_H: f64 = 3.6;

fn push_stats_rows(summary: &mut ReportSummary, stats: &FlightStats) {
    if let Some(distance) = stats.total_distance_m {
        summary.push("Distance (m)", format!("{:.2}", distance));
    }
    if let Some(altitude_diff) = stats.max_altitude_difference_m {
        summary.push("Max Altitude Difference (m)", format!("{:.0}", altitude_diff));
    }

    match stats.speed_m_s {
        Some(ModeSplitStats::Overall(speed)) => {
            summary.push(
                "Average Speed (km/h)",
                format!("{:.2}", speed.mean * M_S_TO_KM_H),
            );
            summary.push("Max Speed (km/h)", format!("{:.2}", speed.max * M_S_TO_KM_H));
        }
        Some(ModeSplitStats::PerMode(per_mode)) => {
            push_mode_speed(summary, "MC", &per_mode.multicopter);
            push_mode_speed(summary, "FW", &per_mode.fixed_wing);
        }
        None => {}
    }

    if let Some(tilt) = stats.tilt_angle_deg {
        summary.push("Average Tilt Angle (deg)", format!("{:.2}", tilt.mean));
        summary.push("Max Tilt Angle (deg)", format!("{:.2}", tilt.max));
    }

    if let Some(rpm) = stats.rpm {
        summary.push("Max RPM", format!("{:.2}", rpm.max));
        summary.push("Average RPM", format!("{:.2}", rpm.mean));
    }

    if let Some(servo) = stats.servo_force_n {
        summary.push("Max Servo Force", format!("{:.2}", servo.max));
        summary.push("Average Servo Force", format!("{:.2}", servo.mean));
    }

    for battery in &stats.batteries {
        match battery.current_a {
            ModeSplitStats::Overall(current) => {
                summary.push("Average Current (A)", format!("{:.2}", current.mean));
                summary.push("Max Current (A)", format!("{:.2}", current.max));
            }
            ModeSplitStats::PerMode(per_mode) => {
                push_mode_current(summary, "MC", &per_mode.multicopter);
                push_mode_current(summary, "FW", &per_mode.fixed_wing);
            }
        }
        summary.push("Begin Voltage (V)", format!("{:.2}", battery.begin_voltage_v));
        summary.push("End Voltage (V)", format!("{:.2}", battery.end_voltage_v));
    }
}

fn push_mode_speed(summary: &mut ReportSummary, mode: &str, aggregate: &ModeAggregate) {
    // A mode with no samples produces no rows; mean=None is absence, not 0.
    if let Some(mean) = aggregate.mean {
        summary.push(
            &format!("Average Speed {} (km/h)", mode),
            format!("{:.2}", mean * M_S_TO_KM_H),
        );
        summary.push(
            &format!("Max Speed {} (km/h)", mode),
            format!("{:.2}", aggregate.max * M_S_TO_KM_H),
        );
    }
}

fn push_mode_current(summary: &mut ReportSummary, mode: &str, aggregate: &ModeAggregate) {
    if let Some(mean) = aggregate.mean {
        summary.push(
            &format!("Average Current {} (A)", mode),
            format!("{:.2}", mean),
        );
        summary.push(
            &format!("Max Current {} (A)", mode),
            format!("{:.2}", aggregate.max),
        );
    }
}
