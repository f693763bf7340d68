use std::collections::BTreeMap;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::domain::{Device, UnknownDevice, WordId};

pub fn generate_route() -> &'static str {
    "/generate"
}

pub fn word_template_route() -> &'static str {
    "/static/word_ui_element.html"
}

pub fn health_route() -> &'static str {
    "/healthz"
}

/// Payload posted to the generation service.
///
/// Serializes as a JSON object keyed by device name, each value being the
/// ordered list of linked word ids. Devices without links never appear and
/// keys are emitted in [`Device`] declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<WordId>>")]
pub struct GenerationRequest {
    entries: Vec<(Device, Vec<WordId>)>,
}

impl GenerationRequest {
    pub fn from_entries(entries: impl IntoIterator<Item = (Device, Vec<WordId>)>) -> Self {
        let mut entries: Vec<_> = entries
            .into_iter()
            .filter(|(_, ids)| !ids.is_empty())
            .collect();
        entries.sort_by_key(|(device, _)| *device);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn devices(&self) -> impl Iterator<Item = Device> + '_ {
        self.entries.iter().map(|(device, _)| *device)
    }

    pub fn linked(&self, device: Device) -> &[WordId] {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == device)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[(Device, Vec<WordId>)] {
        &self.entries
    }
}

impl Serialize for GenerationRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (device, ids) in &self.entries {
            map.serialize_entry(device.as_str(), ids)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, Vec<WordId>>> for GenerationRequest {
    type Error = UnknownDevice;

    fn try_from(raw: BTreeMap<String, Vec<WordId>>) -> Result<Self, Self::Error> {
        let entries = raw
            .into_iter()
            .map(|(key, ids)| Ok((key.parse::<Device>()?, ids)))
            .collect::<Result<Vec<_>, UnknownDevice>>()?;
        Ok(Self::from_entries(entries))
    }
}

/// JSON form of a generated poem, accepted alongside plain-text responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoemResponse {
    pub poem: String,
}
