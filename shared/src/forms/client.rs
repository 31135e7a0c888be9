use crate::models::{CareLevel, Choice, Client};
use crate::payloads::ClientPayload;
use crate::validation::{join_list, optional_text, split_list, FieldErrors};

use super::{bool_value, parse_bool, parse_choice, FormState};

/// Tabs of the client profile form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientFormTab {
    #[default]
    Basic,
    Care,
    Behavior,
    Contacts,
}

impl ClientFormTab {
    pub const ALL: [ClientFormTab; 4] = [
        ClientFormTab::Basic,
        ClientFormTab::Care,
        ClientFormTab::Behavior,
        ClientFormTab::Contacts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClientFormTab::Basic => "Basic Info",
            ClientFormTab::Care => "Care Details",
            ClientFormTab::Behavior => "Behavior Support",
            ClientFormTab::Contacts => "Emergency Contact",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ClientFormTab::Basic => &[
                "client_id",
                "first_name",
                "last_name",
                "date_of_birth",
                "gender",
                "address",
                "is_active",
            ],
            ClientFormTab::Care => &[
                "diagnosis",
                "care_level",
                "communication_needs",
                "medical_notes",
            ],
            ClientFormTab::Behavior => &["behavioral_triggers", "calming_strategies", "interests"],
            ClientFormTab::Contacts => &[
                "emergency_contact_name",
                "emergency_contact_phone",
                "emergency_contact_relationship",
            ],
        }
    }

    /// First tab, in display order, holding a field with an error.
    pub fn first_with_errors(errors: &FieldErrors) -> Option<ClientFormTab> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.fields().iter().any(|field| errors.contains(field)))
    }

    pub fn error_count(&self, errors: &FieldErrors) -> usize {
        self.fields().iter().filter(|field| errors.contains(field)).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientForm {
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub diagnosis: String,
    pub care_level: String,
    /// Comma separated.
    pub behavioral_triggers: String,
    pub calming_strategies: String,
    pub interests: String,
    pub communication_needs: String,
    pub medical_notes: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub emergency_contact_relationship: String,
    pub is_active: bool,
}

impl Default for ClientForm {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            diagnosis: String::new(),
            care_level: CareLevel::default().value().to_string(),
            behavioral_triggers: String::new(),
            calming_strategies: String::new(),
            interests: String::new(),
            communication_needs: String::new(),
            medical_notes: String::new(),
            address: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_phone: String::new(),
            emergency_contact_relationship: String::new(),
            is_active: true,
        }
    }
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            client_id: client.client_id.clone(),
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            date_of_birth: client
                .date_of_birth
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            gender: client.gender.clone().unwrap_or_default(),
            diagnosis: client.diagnosis.clone(),
            care_level: client.care_level.value().to_string(),
            behavioral_triggers: join_list(&client.behavioral_triggers),
            calming_strategies: join_list(&client.calming_strategies),
            interests: join_list(&client.interests),
            communication_needs: client.communication_needs.clone().unwrap_or_default(),
            medical_notes: client.medical_notes.clone().unwrap_or_default(),
            address: client.address.clone().unwrap_or_default(),
            emergency_contact_name: client.emergency_contact_name.clone().unwrap_or_default(),
            emergency_contact_phone: client.emergency_contact_phone.clone().unwrap_or_default(),
            emergency_contact_relationship: client
                .emergency_contact_relationship
                .clone()
                .unwrap_or_default(),
            is_active: client.is_active,
        }
    }
}

impl FormState for ClientForm {
    type Payload = ClientPayload;

    fn value(&self, field: &str) -> String {
        match field {
            "client_id" => self.client_id.clone(),
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "date_of_birth" => self.date_of_birth.clone(),
            "gender" => self.gender.clone(),
            "diagnosis" => self.diagnosis.clone(),
            "care_level" => self.care_level.clone(),
            "behavioral_triggers" => self.behavioral_triggers.clone(),
            "calming_strategies" => self.calming_strategies.clone(),
            "interests" => self.interests.clone(),
            "communication_needs" => self.communication_needs.clone(),
            "medical_notes" => self.medical_notes.clone(),
            "address" => self.address.clone(),
            "emergency_contact_name" => self.emergency_contact_name.clone(),
            "emergency_contact_phone" => self.emergency_contact_phone.clone(),
            "emergency_contact_relationship" => self.emergency_contact_relationship.clone(),
            "is_active" => bool_value(self.is_active),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "client_id" => self.client_id = value,
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "date_of_birth" => self.date_of_birth = value,
            "gender" => self.gender = value,
            "diagnosis" => self.diagnosis = value,
            "care_level" => self.care_level = value,
            "behavioral_triggers" => self.behavioral_triggers = value,
            "calming_strategies" => self.calming_strategies = value,
            "interests" => self.interests = value,
            "communication_needs" => self.communication_needs = value,
            "medical_notes" => self.medical_notes = value,
            "address" => self.address = value,
            "emergency_contact_name" => self.emergency_contact_name = value,
            "emergency_contact_phone" => self.emergency_contact_phone = value,
            "emergency_contact_relationship" => self.emergency_contact_relationship = value,
            "is_active" => self.is_active = parse_bool(&value),
            _ => {}
        }
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("client_id", &self.client_id, "Client ID");
        errors.optional_date("date_of_birth", &self.date_of_birth);
        errors.require("diagnosis", &self.diagnosis, "Diagnosis");
        parse_choice::<CareLevel>(&mut errors, "care_level", &self.care_level, "Care level");
        errors.check_phone("emergency_contact_phone", &self.emergency_contact_phone);
        errors
    }

    fn to_payload(&self) -> Result<ClientPayload, FieldErrors> {
        let mut errors = self.validate();
        let date_of_birth = errors.optional_date("date_of_birth", &self.date_of_birth);
        let care_level = CareLevel::from_value(self.care_level.trim());
        errors.into_result()?;

        Ok(ClientPayload {
            client_id: optional_text(&self.client_id),
            first_name: optional_text(&self.first_name),
            last_name: optional_text(&self.last_name),
            date_of_birth,
            gender: optional_text(&self.gender),
            diagnosis: optional_text(&self.diagnosis),
            care_level,
            behavioral_triggers: split_list(&self.behavioral_triggers),
            calming_strategies: split_list(&self.calming_strategies),
            interests: split_list(&self.interests),
            communication_needs: optional_text(&self.communication_needs),
            medical_notes: optional_text(&self.medical_notes),
            address: optional_text(&self.address),
            emergency_contact_name: optional_text(&self.emergency_contact_name),
            emergency_contact_phone: optional_text(&self.emergency_contact_phone),
            emergency_contact_relationship: optional_text(&self.emergency_contact_relationship),
            is_active: Some(self.is_active),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::client;

    fn named_form() -> ClientForm {
        let mut form = ClientForm::default();
        form.set("first_name", "Tendai".to_string());
        form.set("last_name", "Chikwanha".to_string());
        form
    }

    #[test]
    fn test_missing_client_id_and_diagnosis_give_exactly_two_errors() {
        let errors = ClientForm::default().validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("client_id"));
        assert!(errors.contains("diagnosis"));
        assert!(ClientForm::default().to_payload().is_err());
    }

    #[test]
    fn test_names_are_optional() {
        let mut form = ClientForm::default();
        form.set("client_id", "TAV-0050".to_string());
        form.set("diagnosis", "Autism spectrum disorder".to_string());
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.first_name, None);
        assert_eq!(payload.last_name, None);
    }

    #[test]
    fn test_payload_splits_lists_and_drops_blanks() {
        let mut form = named_form();
        form.set("client_id", "TAV-0042".to_string());
        form.set("diagnosis", "Down syndrome".to_string());
        form.set("behavioral_triggers", "crowds, loud music,".to_string());
        form.set("gender", "   ".to_string());

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.client_id.as_deref(), Some("TAV-0042"));
        assert_eq!(payload.behavioral_triggers, vec!["crowds", "loud music"]);
        assert_eq!(payload.gender, None);
        assert_eq!(payload.care_level, Some(CareLevel::Moderate));

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("gender").is_none());
        assert!(json.get("date_of_birth").is_none());
    }

    #[test]
    fn test_first_tab_with_errors() {
        let mut form = ClientForm::from_client(&client(1));
        form.set("emergency_contact_phone", "call me".to_string());
        let errors = form.validate();
        assert_eq!(ClientFormTab::first_with_errors(&errors), Some(ClientFormTab::Contacts));

        form.set("diagnosis", String::new());
        let errors = form.validate();
        assert_eq!(ClientFormTab::first_with_errors(&errors), Some(ClientFormTab::Care));
        assert_eq!(ClientFormTab::Care.error_count(&errors), 1);
    }

    #[test]
    fn test_round_trip_from_existing_client_is_clean() {
        let form = ClientForm::from_client(&client(7));
        assert!(form.validate().is_empty());
        assert_eq!(form.value("behavioral_triggers"), "Loud noises");
        assert_eq!(form.value("date_of_birth"), "2001-05-17");
    }
}
