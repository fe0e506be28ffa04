use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::session::{AuthError, SessionStore};
use crate::clinic::Appointment;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Auth error: {0}")]
    AuthError(#[from] AuthError),
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Raw appointment row from the `consultas/vwcompleta` view. Every field is
/// optional so one incomplete row rejects that row, not the whole response.
#[derive(Debug, Deserialize)]
struct ConsultaRecord {
    id: Option<i64>,
    nome_paciente: Option<String>,
    nome_profissional: Option<String>,
    data_agendamento: Option<String>,
    situacao: Option<String>,
}

impl ConsultaRecord {
    fn into_appointment(self) -> Result<Appointment, ApiError> {
        Ok(Appointment {
            id: self
                .id
                .ok_or_else(|| ApiError::ParseError("Missing appointment id".to_string()))?,
            patient_name: self
                .nome_paciente
                .ok_or_else(|| ApiError::ParseError("Missing patient name".to_string()))?,
            professional_name: self
                .nome_profissional
                .ok_or_else(|| ApiError::ParseError("Missing professional name".to_string()))?,
            scheduled_at: self
                .data_agendamento
                .ok_or_else(|| ApiError::ParseError("Missing appointment date".to_string()))?,
            status: self.situacao.unwrap_or_default(),
        })
    }
}

/// Payload for `POST /agendamentos` and `PUT /consultas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    #[serde(rename = "pacienteId")]
    pub patient_id: i64,
    #[serde(rename = "profissionalId")]
    pub professional_id: i64,
    #[serde(rename = "data")]
    pub scheduled_at: String,
    pub status: String,
    #[serde(rename = "obs")]
    pub notes: String,
}

/// Minimal person row from the patient/professional search endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonRef {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
}

#[async_trait]
pub trait ClinicApi {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, ApiError>;

    async fn create_appointment(&self, appointment: &NewAppointment) -> Result<(), ApiError>;

    async fn update_appointment(
        &self,
        id: i64,
        appointment: &NewAppointment,
    ) -> Result<(), ApiError>;

    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError>;

    async fn search_patients(&self, term: &str) -> Result<Vec<PersonRef>, ApiError>;

    async fn search_professionals(&self, term: &str) -> Result<Vec<PersonRef>, ApiError>;
}

pub struct ClinicClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
}

impl ClinicClient {
    pub fn new(base_url: String, session: SessionStore) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
            session,
        }
    }

    /// Sends a bearer-authorized request. On 401 the session is refreshed
    /// once and the request retried; a second 401 is an auth failure.
    async fn send_authorized(
        &self,
        build: impl Fn(&reqwest::Client, &str) -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let tokens = self.session.load()?;

        let response = build(&self.http, &tokens.access_token).send().await?;
        if response.status() != 401 {
            return Ok(response);
        }

        tracing::warn!("Request returned 401, attempting session refresh");
        let refreshed = self.session.refresh(&self.http, &self.base_url).await?;

        let retry = build(&self.http, &refreshed.access_token).send().await?;
        if retry.status() == 401 {
            tracing::error!("Request still unauthorized after refresh");
            return Err(ApiError::AuthenticationFailed);
        }
        Ok(retry)
    }

    async fn check_status(
        response: reqwest::Response,
        subject: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status == 404 {
            tracing::error!("{} not found", subject);
            return Err(ApiError::NotFound(subject.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Request for {} failed. Status: {}, Body: {}", subject, status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }
        Ok(response)
    }

    async fn search_people(&self, path: &str, term: &str) -> Result<Vec<PersonRef>, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .send_authorized(|http, token| {
                http.get(&url).bearer_auth(token).query(&[("search", term)])
            })
            .await?;

        let response = Self::check_status(response, path).await?;
        let people: Vec<PersonRef> = response.json().await?;
        Ok(people)
    }
}

#[async_trait]
impl ClinicApi for ClinicClient {
    async fn fetch_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let url = format!("{}/consultas/vwcompleta", self.base_url);
        tracing::info!("Fetching appointment list");

        let response = self
            .send_authorized(|http, token| http.get(&url).bearer_auth(token))
            .await?;
        let response = Self::check_status(response, "consultas").await?;

        let records: Vec<ConsultaRecord> = response.json().await?;
        let total = records.len();

        let appointments: Vec<Appointment> = records
            .into_iter()
            .filter_map(|record| match record.into_appointment() {
                Ok(appointment) => Some(appointment),
                Err(e) => {
                    tracing::warn!("Rejecting malformed appointment record: {}", e);
                    None
                }
            })
            .collect();

        tracing::info!("Fetched {} of {} appointment records", appointments.len(), total);
        Ok(appointments)
    }

    async fn create_appointment(&self, appointment: &NewAppointment) -> Result<(), ApiError> {
        let url = format!("{}/agendamentos", self.base_url);
        tracing::info!(
            "Creating appointment for patient {} at {}",
            appointment.patient_id,
            appointment.scheduled_at
        );

        let response = self
            .send_authorized(|http, token| http.post(&url).bearer_auth(token).json(appointment))
            .await?;
        Self::check_status(response, "agendamentos").await?;

        tracing::info!("Appointment created successfully");
        Ok(())
    }

    async fn update_appointment(
        &self,
        id: i64,
        appointment: &NewAppointment,
    ) -> Result<(), ApiError> {
        let url = format!("{}/consultas/{}", self.base_url, id);
        tracing::info!("Updating appointment {}", id);

        let response = self
            .send_authorized(|http, token| http.put(&url).bearer_auth(token).json(appointment))
            .await?;
        Self::check_status(response, &format!("consulta {}", id)).await?;

        tracing::info!("Appointment {} updated successfully", id);
        Ok(())
    }

    async fn delete_appointment(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/consultas/{}", self.base_url, id);
        tracing::info!("Deleting appointment {}", id);

        let response = self
            .send_authorized(|http, token| http.delete(&url).bearer_auth(token))
            .await?;
        Self::check_status(response, &format!("consulta {}", id)).await?;

        Ok(())
    }

    async fn search_patients(&self, term: &str) -> Result<Vec<PersonRef>, ApiError> {
        self.search_people("pacientes", term).await
    }

    async fn search_professionals(&self, term: &str) -> Result<Vec<PersonRef>, ApiError> {
        self.search_people("profissionais", term).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_record_converts_to_appointment() {
        let record = ConsultaRecord {
            id: Some(7),
            nome_paciente: Some("Ana".to_string()),
            nome_profissional: Some("Dr. Silva".to_string()),
            data_agendamento: Some("2024-05-01T09:00:00Z".to_string()),
            situacao: Some("Agendado".to_string()),
        };

        let appointment = record.into_appointment().unwrap();

        assert_eq!(appointment.id, 7);
        assert_eq!(appointment.patient_name, "Ana");
        assert_eq!(appointment.professional_name, "Dr. Silva");
        assert_eq!(appointment.status, "Agendado");
    }

    #[test]
    fn record_without_id_is_rejected() {
        let record = ConsultaRecord {
            id: None,
            nome_paciente: Some("Ana".to_string()),
            nome_profissional: Some("Dr. Silva".to_string()),
            data_agendamento: Some("2024-05-01T09:00:00Z".to_string()),
            situacao: Some("Agendado".to_string()),
        };

        assert!(record.into_appointment().is_err());
    }

    #[test]
    fn record_without_status_defaults_to_empty_label() {
        let record = ConsultaRecord {
            id: Some(7),
            nome_paciente: Some("Ana".to_string()),
            nome_profissional: Some("Dr. Silva".to_string()),
            data_agendamento: Some("2024-05-01T09:00:00Z".to_string()),
            situacao: None,
        };

        let appointment = record.into_appointment().unwrap();
        assert_eq!(appointment.status, "");
    }

    #[test]
    fn new_appointment_serializes_with_backend_field_names() {
        let payload = NewAppointment {
            patient_id: 3,
            professional_id: 9,
            scheduled_at: "2024-05-01T09:00:00.000Z".to_string(),
            status: "Agendado".to_string(),
            notes: "retorno".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["pacienteId"], 3);
        assert_eq!(json["profissionalId"], 9);
        assert_eq!(json["data"], "2024-05-01T09:00:00.000Z");
        assert_eq!(json["status"], "Agendado");
        assert_eq!(json["obs"], "retorno");
    }
}
