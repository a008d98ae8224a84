use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use tempfile::NamedTempFile;

use shared_config::AppConfig;

pub const CSV_HEADER: [&str; 6] = [
    "Nom & Prénom",
    "Spécialité",
    "Mode Exercice",
    "Adresse Professionnelle",
    "Téléphone",
    "Governorate",
];

pub const PRIVATE_PRACTICE: &str = "Médecin de Libre Pratique";

pub struct TestConfig {
    pub doctors_csv_path: String,
    pub fuzzy_threshold: u8,
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub required_practice_mode: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            doctors_csv_path: "test_docs.csv".to_string(),
            fuzzy_threshold: 60,
            default_page_size: 20,
            max_page_size: 100,
            required_practice_mode: None,
        }
    }
}

impl TestConfig {
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_required_practice_mode(mut self, mode: &str) -> Self {
        self.required_practice_mode = Some(mode.to_string());
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            doctors_csv_path: self.doctors_csv_path.clone(),
            host: "127.0.0.1".to_string(),
            port: 0,
            fuzzy_threshold: self.fuzzy_threshold,
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
            required_practice_mode: self.required_practice_mode.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// One roster row, in CSV column order.
#[derive(Debug, Clone)]
pub struct TestDoctor {
    pub full_name: String,
    pub specialty: String,
    pub practice_mode: String,
    pub professional_address: String,
    pub phone: String,
    pub governorate: String,
}

impl TestDoctor {
    pub fn new(full_name: &str, specialty: &str, governorate: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            specialty: specialty.to_string(),
            practice_mode: PRIVATE_PRACTICE.to_string(),
            professional_address: format!("Avenue Habib Bourguiba, {}", governorate),
            phone: "71 000 000".to_string(),
            governorate: governorate.to_string(),
        }
    }

    pub fn with_practice_mode(mut self, mode: &str) -> Self {
        self.practice_mode = mode.to_string();
        self
    }

    pub fn row(&self) -> [&str; 6] {
        [
            self.full_name.as_str(),
            self.specialty.as_str(),
            self.practice_mode.as_str(),
            self.professional_address.as_str(),
            self.phone.as_str(),
            self.governorate.as_str(),
        ]
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "full_name": self.full_name,
            "specialty": self.specialty,
            "practice_mode": self.practice_mode,
            "professional_address": self.professional_address,
            "phone": self.phone,
            "governorate": self.governorate
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RosterFixture {
    pub doctors: Vec<TestDoctor>,
}

impl RosterFixture {
    pub fn new(doctors: Vec<TestDoctor>) -> Self {
        Self { doctors }
    }

    /// "Ali Ben Salah", Cardiology, Tunis.
    pub fn single() -> Self {
        Self::new(vec![TestDoctor::new("Ali Ben Salah", "Cardiology", "Tunis")])
    }

    /// `count` cardiologists named "Doctor 1".."Doctor N", all in Sfax.
    pub fn cardiologists(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|i| TestDoctor::new(&format!("Doctor {}", i), "Cardiology", "Sfax"))
                .collect(),
        )
    }

    pub fn mixed() -> Self {
        Self::new(vec![
            TestDoctor::new("Ali Ben Salah", "Cardiology", "Tunis"),
            TestDoctor::new("Jean Dupont", "Dermatologie", "Sousse"),
            TestDoctor::new("Héla Trabelsi", "Pédiatrie", "Sfax"),
            TestDoctor::new("Mohamed Ali Gharbi", "Cardiologie Interventionnelle", "Tunis"),
            TestDoctor::new("Salah Ben Ali", "Médecine Générale", "Ariana")
                .with_practice_mode("Médecin Hospitalier"),
            TestDoctor::new("Sonia Mejri", "Dermatologie", "Tunis"),
        ])
    }

    pub fn push(mut self, doctor: TestDoctor) -> Self {
        self.doctors.push(doctor);
        self
    }

    /// Serializes the roster with a header row, as the service expects on disk.
    pub fn to_csv(&self) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(CSV_HEADER)
            .expect("writing to memory cannot fail");
        for doctor in &self.doctors {
            writer
                .write_record(doctor.row())
                .expect("writing to memory cannot fail");
        }
        let bytes = writer.into_inner().expect("flushing to memory cannot fail");
        String::from_utf8(bytes).expect("roster fixture is valid UTF-8")
    }

    pub fn write_csv(&self) -> NamedTempFile {
        write_roster_csv(&self.to_csv())
    }
}

pub fn write_roster_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp roster file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp roster file");
    file.flush().expect("Failed to flush temp roster file");
    file
}
