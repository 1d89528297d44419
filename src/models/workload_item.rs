use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;
use crate::utils::number::{lenient_opt_count, lenient_opt_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpec {
    pub volume_type_id: String,
    pub storage_size_gb: u32,
}

/// Names shown in tables; never sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadDisplay {
    #[serde(default)]
    pub compute_name: Option<String>,
    #[serde(default)]
    pub os_name: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
}

/// One compute request in the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadItem {
    pub region: String,
    pub compute_instance_id: String,
    pub os_image_id: String,
    pub months: u32,
    pub number_of_instances: u32,
    #[serde(default)]
    pub volume_types: Vec<VolumeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_connect_id: Option<String>,
    #[serde(rename = "_display", default, skip_serializing_if = "Option::is_none")]
    pub display: Option<WorkloadDisplay>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeDraft {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub volume_type_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub storage_size_gb: Option<u32>,
}

/// Unvalidated "add workload" form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadDraft {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub compute_instance_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub os_image_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub months: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub number_of_instances: Option<u32>,
    #[serde(default, alias = "volumes")]
    pub volume_types: Vec<VolumeDraft>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub bandwidth_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub bandwidth_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub floating_ip_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_count")]
    pub floating_ip_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub cross_connect_id: Option<String>,
    #[serde(default, rename = "_display")]
    pub display: Option<WorkloadDisplay>,
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl WorkloadDraft {
    /// Validate the form. Months and instance count default to one; add-on
    /// counts default to one when their product is selected.
    pub fn validate(&self) -> Result<WorkloadItem, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let region = required(&self.region);
        if region.is_none() {
            errors.add("region", "Region is required");
        }
        let compute_instance_id = required(&self.compute_instance_id);
        if compute_instance_id.is_none() {
            errors.add("compute_instance_id", "Compute instance is required");
        }
        let os_image_id = required(&self.os_image_id);
        if os_image_id.is_none() {
            errors.add("os_image_id", "OS image is required");
        }
        let months = self.months.unwrap_or(1);
        if months < 1 {
            errors.add("months", "Months must be at least 1");
        }
        let number_of_instances = self.number_of_instances.unwrap_or(1);
        if number_of_instances < 1 {
            errors.add("number_of_instances", "Number of instances must be at least 1");
        }

        let mut volume_types = Vec::with_capacity(self.volume_types.len());
        for (i, v) in self.volume_types.iter().enumerate() {
            let type_id = required(&v.volume_type_id);
            if type_id.is_none() {
                errors.add(format!("volume_types.{}.volume_type_id", i), "Volume type is required");
            }
            let size = v.storage_size_gb.unwrap_or(0);
            if size < 1 {
                errors.add(
                    format!("volume_types.{}.storage_size_gb", i),
                    "Storage size must be at least 1 GB",
                );
            }
            if let Some(volume_type_id) = type_id {
                volume_types.push(VolumeSpec { volume_type_id, storage_size_gb: size });
            }
        }

        let bandwidth_id = required(&self.bandwidth_id);
        let bandwidth_count = addon_count(&bandwidth_id, self.bandwidth_count);
        if bandwidth_count == Some(0) {
            errors.add("bandwidth_count", "Bandwidth count must be at least 1");
        }
        let floating_ip_id = required(&self.floating_ip_id);
        let floating_ip_count = addon_count(&floating_ip_id, self.floating_ip_count);
        if floating_ip_count == Some(0) {
            errors.add("floating_ip_count", "Floating IP count must be at least 1");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(WorkloadItem {
            region: region.unwrap_or_default(),
            compute_instance_id: compute_instance_id.unwrap_or_default(),
            os_image_id: os_image_id.unwrap_or_default(),
            months,
            number_of_instances,
            volume_types,
            bandwidth_id,
            bandwidth_count,
            floating_ip_id,
            floating_ip_count,
            cross_connect_id: required(&self.cross_connect_id),
            display: self.display.clone(),
        })
    }
}

fn addon_count(id: &Option<String>, count: Option<u32>) -> Option<u32> {
    id.as_ref().map(|_| count.unwrap_or(1))
}
