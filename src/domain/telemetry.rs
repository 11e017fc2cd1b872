// Telemetry record domain model
use serde::{Deserialize, Serialize};

/// One complete telemetry frame for the payload.
///
/// Records are replaced wholesale on every tick; nothing outside the engine
/// edits a field in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    // Atmospheric & kinematic
    pub pressure_sp: f64,
    pub pressure_c: f64,
    pub descent_rate_sp: f64,
    pub altitude_c: f64,
    pub altitude_sp: f64,
    pub altitude: f64,

    // Ground stations
    pub station1_temp: f64,
    pub station2_temp: f64,

    // Attitude
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,

    // GNSS
    pub gps_lat: f64,
    pub gps_lon: f64,
    pub gps_alt: f64,

    // Payload subsystems
    pub filter_status: String,
    pub last_command: String,
    pub camera_status: String,
    pub battery_voltage: f64,
    pub filter_mechanism: String,
    pub camera: String,
    pub storage: String,

    // Mission
    pub mission_time: u64,
    pub connection_status: String,

    // IAS fault parameters
    pub error_code: String,
    pub descent_rate_c: String,
    pub descent_rate_sp_status: String,
    pub pressure_data_c: String,
    pub orientation_data_sp: String,
    pub separation_activation: String,
    pub filtering_mechanism: String,

    pub overall_status: String,
}

impl Default for TelemetryRecord {
    fn default() -> Self {
        Self {
            pressure_sp: 96560.0,
            pressure_c: 96560.0,
            descent_rate_sp: 7.2,
            altitude_c: 225.4,
            altitude_sp: 218.7,
            altitude: 6.9,

            station1_temp: 26.8,
            station2_temp: 27.4,

            pitch: 44.2,
            roll: 6.4,
            yaw: 94.0,

            gps_lat: 40.412233,
            gps_lon: 29.998477,
            gps_alt: 247.5,

            filter_status: "Activated".to_string(),
            last_command: "669R".to_string(),
            camera_status: "Recording".to_string(),
            battery_voltage: 8.4,
            filter_mechanism: "Responding".to_string(),
            camera: "ON".to_string(),
            storage: "OK".to_string(),

            mission_time: 0,
            connection_status: "Connected".to_string(),

            error_code: "010041".to_string(),
            descent_rate_c: "IN RANGE".to_string(),
            descent_rate_sp_status: "O.F.RANGE".to_string(),
            pressure_data_c: "NORMAL".to_string(),
            orientation_data_sp: "STABLE".to_string(),
            separation_activation: "FAILED".to_string(),
            filtering_mechanism: "ACTIVE".to_string(),

            overall_status: "Critical".to_string(),
        }
    }
}

impl TelemetryRecord {
    /// The six BIT parameters shown on the alarm console, in display order.
    pub fn fault_parameters(&self) -> [(&'static str, &str); 6] {
        [
            ("Descent Rate C", &self.descent_rate_c),
            ("Descent Rate SP", &self.descent_rate_sp_status),
            ("Pressure Data C", &self.pressure_data_c),
            ("Orientation Data SP", &self.orientation_data_sp),
            ("Separation Activation", &self.separation_activation),
            ("Filtering Mechanism", &self.filtering_mechanism),
        ]
    }

    pub fn mission_clock(&self) -> String {
        format_mission_time(self.mission_time)
    }
}

/// Render mission seconds as `HH:MM:SS`. Hours keep counting past 24.
pub fn format_mission_time(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hrs, mins, secs)
}
