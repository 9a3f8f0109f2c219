//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PATIENT_HEADER: &[&str] = &[
    "PatientID",
    "PatientGender",
    "PatientDateOfBirth",
    "PatientRace",
    "PatientMaritalStatus",
    "PatientLanguage",
    "PatientPopulationPercentageBelowPoverty",
];

pub const LAB_HEADER: &[&str] = &[
    "PatientID",
    "AdmissionID",
    "LabName",
    "LabValue",
    "LabUnits",
    "LabDateTime",
];

/// Patient and lab files written into a temporary directory
pub struct Fixture {
    dir: TempDir,
    pub patients_path: PathBuf,
    pub labs_path: PathBuf,
}

impl Fixture {
    pub fn new(patients: &[&[&str]], labs: &[&[&str]]) -> Self {
        Self::with_headers(PATIENT_HEADER, patients, LAB_HEADER, labs)
    }

    pub fn with_headers(
        patient_header: &[&str],
        patients: &[&[&str]],
        lab_header: &[&str],
        labs: &[&[&str]],
    ) -> Self {
        let dir = TempDir::new().unwrap();
        let patients_path = dir.path().join("PatientCorePopulatedTable.txt");
        let labs_path = dir.path().join("LabsCorePopulatedTable.txt");

        fs::write(&patients_path, tab_file(patient_header, patients)).unwrap();
        fs::write(&labs_path, tab_file(lab_header, labs)).unwrap();

        Self {
            dir,
            patients_path,
            labs_path,
        }
    }

    /// Prefixes the patient file with a UTF-8 byte-order mark
    pub fn with_patient_bom(self) -> Self {
        let contents = fs::read_to_string(&self.patients_path).unwrap();
        fs::write(&self.patients_path, format!("\u{feff}{contents}")).unwrap();
        self
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}

pub fn tab_file(header: &[&str], rows: &[&[&str]]) -> String {
    let mut out = header.join("\t");
    out.push('\n');
    for row in rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// One patient with one albumin lab
pub fn albumin_fixture() -> Fixture {
    Fixture::new(
        &[
            &[
                "1",
                "Male",
                "1947-12-28 02:45:40.547",
                "Unknown",
                "Married",
                "Icelandic",
                "18.08",
            ],
            &[
                "2",
                "Female",
                "1990-01-01 00:00:00.000",
                "White",
                "Single",
                "English",
                "9.5",
            ],
        ],
        &[&[
            "1",
            "1",
            "METABOLIC: ALBUMIN",
            "4.0",
            "g/dL",
            "2019-01-01 00:00:00.000",
        ]],
    )
}
