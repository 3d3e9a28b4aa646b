use tabled::Table;

use crate::{error, info, success, utils, warning};

pub async fn devices() {
    let client = super::load_client().await;

    let devices = match client.devices().await {
        Ok(devices) => devices,
        Err(e) => error!("Cannot list devices: {}", e),
    };

    if devices.is_empty() {
        warning!("No device available. Open Spotify on one of your devices.");
        return;
    }
    println!("{}", Table::new(utils::device_rows(&devices)));
}

pub async fn pause() {
    let client = super::load_client().await;

    match client.playback_state().await {
        Ok(Some(state)) if state.is_playing => {}
        Ok(_) => {
            info!("Nothing is playing.");
            return;
        }
        Err(e) => error!("Cannot read playback state: {}", e),
    }

    match client.pause().await {
        Ok(()) => success!("Playback paused"),
        Err(e) => error!("Cannot pause playback: {}", e),
    }
}
