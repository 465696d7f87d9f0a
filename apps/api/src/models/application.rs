use serde::{Deserialize, Serialize};

/// Who is applying. Passed through unmodified to generation and rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(rename = "userName", default)]
    pub name: String,
    #[serde(rename = "userEmail", default)]
    pub email: String,
    #[serde(rename = "userPhone", default)]
    pub phone: String,
}

/// What they are applying for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTarget {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_uses_wire_field_names() {
        let profile: ApplicantProfile = serde_json::from_value(serde_json::json!({
            "userName": "Jane Doe",
            "userEmail": "jane@example.com",
            "userPhone": "555-0100"
        }))
        .unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.phone, "555-0100");
    }

    #[test]
    fn test_missing_job_fields_default_to_empty() {
        let job: JobTarget = serde_json::from_value(serde_json::json!({"companyName": "Acme"})).unwrap();
        assert_eq!(job.company_name, "Acme");
        assert!(job.position.is_empty());
    }
}
