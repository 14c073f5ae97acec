// SPDX-License-Identifier: MPL-2.0
//! Mapping raw filesystem paths to the host's image-serving coordinates.
//!
//! The host serves images by `(type, subfolder, filename)`, where `type` names
//! one of its three root directories. Search results carry absolute paths, so
//! the coordinates are recovered by looking for the last `input`, `output` or
//! `temp` directory segment in the path. Both `/` and `\` separators are
//! accepted since the host may run on Windows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root directory an image lives under on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    Input,
    Output,
    Temp,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Input => "input",
            ImageType::Output => "output",
            ImageType::Temp => "temp",
        }
    }

    /// Parses a directory segment, ignoring ASCII case.
    pub fn from_segment(segment: &str) -> Option<Self> {
        if segment.eq_ignore_ascii_case("input") {
            Some(ImageType::Input)
        } else if segment.eq_ignore_ascii_case("output") {
            Some(ImageType::Output)
        } else if segment.eq_ignore_ascii_case("temp") {
            Some(ImageType::Temp)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinates of an image on the host's view endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLocation {
    pub filename: String,
    pub subfolder: String,
    #[serde(rename = "type")]
    pub image_type: ImageType,
}

impl ImageLocation {
    /// Resolves a raw path.
    ///
    /// Paths without a recognizable root fall back to the final segment as
    /// filename, `input` as type and an empty subfolder.
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .collect();

        let Some((filename, dirs)) = segments.split_last() else {
            return Self {
                filename: path.to_string(),
                subfolder: String::new(),
                image_type: ImageType::Input,
            };
        };

        let marker = dirs
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, segment)| ImageType::from_segment(segment).map(|t| (index, t)));

        match marker {
            Some((index, image_type)) => Self {
                filename: (*filename).to_string(),
                subfolder: dirs[index + 1..].join("/"),
                image_type,
            },
            None => Self {
                filename: (*filename).to_string(),
                subfolder: String::new(),
                image_type: ImageType::Input,
            },
        }
    }

    /// URL of the image on the host's view endpoint, relative to `base`.
    pub fn view_url(&self, base: &str) -> String {
        format!(
            "{}/view?filename={}&subfolder={}&type={}",
            base.trim_end_matches('/'),
            urlencoding::encode(&self.filename),
            urlencoding::encode(&self.subfolder),
            self.image_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_unix_output_path_with_subfolder() {
        let location = ImageLocation::from_path("/home/me/ComfyUI/output/portraits/day1/a.png");
        assert_eq!(location.image_type, ImageType::Output);
        assert_eq!(location.subfolder, "portraits/day1");
        assert_eq!(location.filename, "a.png");
    }

    #[test]
    fn resolves_windows_path_case_insensitively() {
        let location = ImageLocation::from_path(r"C:\ComfyUI\Temp\preview_0001.png");
        assert_eq!(location.image_type, ImageType::Temp);
        assert_eq!(location.subfolder, "");
        assert_eq!(location.filename, "preview_0001.png");
    }

    #[test]
    fn uses_last_marker_segment() {
        let location = ImageLocation::from_path("/data/input/archive/output/x.webp");
        assert_eq!(location.image_type, ImageType::Output);
        assert_eq!(location.subfolder, "");
    }

    #[test]
    fn filename_named_like_a_marker_is_not_a_directory() {
        let location = ImageLocation::from_path("/srv/images/output");
        assert_eq!(location.filename, "output");
        assert_eq!(location.image_type, ImageType::Input);
    }

    #[test]
    fn unresolvable_path_falls_back_to_input() {
        let location = ImageLocation::from_path("/srv/gallery/cat.jpg");
        assert_eq!(location.filename, "cat.jpg");
        assert_eq!(location.subfolder, "");
        assert_eq!(location.image_type, ImageType::Input);
    }

    #[test]
    fn view_url_encodes_components() {
        let location = ImageLocation {
            filename: "my cat.png".into(),
            subfolder: "a/b".into(),
            image_type: ImageType::Output,
        };
        assert_eq!(
            location.view_url("http://host/"),
            "http://host/view?filename=my%20cat.png&subfolder=a%2Fb&type=output"
        );
    }
}
