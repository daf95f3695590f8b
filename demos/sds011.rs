use sds011::{ReportingMode, Sds011, SerialTransport};
use std::thread::sleep;
use std::time::Duration;

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).expect("Missing path to serial device");
    let transport = SerialTransport::open(&path).unwrap();
    let mut sensor = Sds011::new(transport);

    sensor.set_sleep(false).unwrap();
    sensor.set_mode(ReportingMode::Query).unwrap();
    match sensor.firmware_version() {
        Ok(version) => println!("{}", version),
        Err(e) => println!("{}", e),
    }
    sleep(Duration::from_secs(3));

    match sensor.query_data() {
        Ok(Some(m)) => println!("{}", m),
        Ok(None) => println!("No measurement in response"),
        Err(e) => println!("{}", e),
    }
    sensor.set_mode(ReportingMode::Active).unwrap();
    sensor.set_sleep(true).unwrap();
}
