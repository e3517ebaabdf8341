use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of `devices.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub codename: String,
    pub device: String,
    #[serde(default)]
    pub xda: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
}

/// Codename to display name, in directory order.
pub fn display_names(devices: &[Device]) -> IndexMap<String, String> {
    devices
        .iter()
        .map(|d| (d.codename.clone(), d.device.clone()))
        .collect()
}

pub fn find_by_codename<'a>(devices: &'a [Device], codename: &str) -> Option<&'a Device> {
    devices.iter().find(|d| d.codename == codename)
}

/// What the device page shows for a codename, falling back to the bare codename.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeviceInfo {
    pub codename: String,
    pub model: String,
    pub xda: Option<String>,
    pub maintainer: Option<String>,
}

impl DeviceInfo {
    pub fn resolve(devices: &[Device], codename: &str) -> Self {
        match find_by_codename(devices, codename) {
            Some(d) => Self {
                codename: codename.to_string(),
                model: d.device.clone(),
                xda: d.xda.clone(),
                maintainer: d.maintainer.clone(),
            },
            None => Self {
                codename: codename.to_string(),
                model: codename.to_string(),
                xda: None,
                maintainer: None,
            },
        }
    }
}
