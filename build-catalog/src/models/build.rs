use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Build types that get a download section on the device page.
pub const ALLOWED_BUILD_TYPES: [&str; 2] = ["official", "gapps"];

/// `builds.json`: codename to builds, newest first as published.
pub type BuildManifest = IndexMap<String, Vec<Build>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Build {
    pub filename: String,
    #[serde(rename = "type")]
    pub build_type: String,
    pub version: String,
    pub date: String,
    pub sha256: String,
    pub filepath: String,
    pub size: u64,
    #[serde(default)]
    pub fastboot_images: bool,
    #[serde(default)]
    pub boot_image: bool,
}

impl Build {
    pub fn download_url(&self, base_url: &str) -> String {
        format!("{}{}{}", base_url, self.filepath, self.filename)
    }

    pub fn fastboot_filename(&self) -> String {
        self.filename.replace(".zip", "-img.zip")
    }

    pub fn boot_image_filename(&self) -> String {
        self.filename.replace(".zip", "-boot.img")
    }

    pub fn timestamp(&self) -> anyhow::Result<i64> {
        parse_timestamp(&self.date)
            .with_context(|| format!("Invalid date for build {}", self.filename))
    }
}

/// First build of `build_type` in manifest order.
pub fn first_of_type<'a>(builds: &'a [Build], build_type: &str) -> Option<&'a Build> {
    builds.iter().find(|b| b.build_type == build_type)
}

/// A downloadable file on the device page and the build it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableFile<'a> {
    pub build: &'a Build,
    pub filename: String,
}

impl AvailableFile<'_> {
    pub fn download_url(&self, base_url: &str) -> String {
        format!("{}{}{}", base_url, self.build.filepath, self.filename)
    }
}

/// File kind (`official`, `official-img`, `gapps-boot`, ...) to the file
/// published under it.
///
/// Builds are applied in manifest order and a later build of the same type
/// replaces the entries it provides. A kind keeps its first position.
pub fn available_downloads(builds: &[Build]) -> IndexMap<String, AvailableFile<'_>> {
    let mut files = IndexMap::new();
    for build in builds {
        let kind = build.build_type.as_str();
        if !ALLOWED_BUILD_TYPES.contains(&kind) {
            continue;
        }
        files.insert(
            kind.to_string(),
            AvailableFile {
                build,
                filename: build.filename.clone(),
            },
        );
        if build.fastboot_images {
            files.insert(
                format!("{kind}-img"),
                AvailableFile {
                    build,
                    filename: build.fastboot_filename(),
                },
            );
        }
        if build.boot_image {
            files.insert(
                format!("{kind}-boot"),
                AvailableFile {
                    build,
                    filename: build.boot_image_filename(),
                },
            );
        }
    }
    files
}

/// File kind to filename.
pub fn available_files(builds: &[Build]) -> IndexMap<String, String> {
    available_downloads(builds)
        .into_iter()
        .map(|(kind, file)| (kind, file.filename))
        .collect()
}

/// Unix seconds for a manifest date. Timestamps without an offset are UTC.
pub fn parse_timestamp(value: &str) -> anyhow::Result<i64> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp());
    }
    // %z also takes basic offsets such as +0200
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Ok(dt.timestamp());
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc().timestamp());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc().timestamp());
            }
        }
    }

    anyhow::bail!("unrecognized timestamp '{}'", value)
}

/// One entry of the OTA check response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OtaRelease {
    pub id: String,
    pub url: String,
    pub romtype: String,
    pub datetime: i64,
    pub version: String,
    pub filename: String,
    pub size: u64,
}

impl OtaRelease {
    pub fn from_build(build: &Build, download_base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            id: build.sha256.clone(),
            url: build.download_url(download_base_url),
            romtype: build.build_type.clone(),
            datetime: build.timestamp()?,
            version: build.version.clone(),
            filename: build.filename.clone(),
            size: build.size,
        })
    }
}
