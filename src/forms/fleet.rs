use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{PlateNumber, TypeConstraintError, Vin};
use crate::domain::vehicle::NewVehicle;

#[derive(Debug, Deserialize, Validate)]
pub struct AddVehicleForm {
    #[validate(length(min = 1))]
    pub plate_number: String,
    #[validate(length(equal = 17))]
    pub vin: String,
    #[validate(length(min = 1))]
    pub make: String,
    #[validate(length(min = 1))]
    pub model: String,
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,
    /// Select value; the empty option means "no garage".
    #[serde(default)]
    pub garage_id: String,
}

impl AddVehicleForm {
    pub fn to_new_vehicle(&self, org_id: i32) -> Result<NewVehicle, TypeConstraintError> {
        Ok(NewVehicle::new(
            org_id,
            PlateNumber::new(&self.plate_number)?,
            Vin::new(&self.vin)?,
            self.make.clone(),
            self.model.clone(),
            self.year,
            self.garage_id.trim().parse().ok(),
        ))
    }
}

#[derive(MultipartForm)]
pub struct UploadVehiclesForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

#[derive(Debug, Deserialize)]
struct VehicleCsvRow {
    plate_number: String,
    vin: String,
    make: String,
    model: String,
    year: i32,
    #[serde(default)]
    garage_id: Option<i32>,
}

impl UploadVehiclesForm {
    /// Parses the uploaded CSV. The whole file is rejected on the first bad
    /// row so a partial import never happens silently.
    pub fn parse(&mut self, org_id: i32) -> Result<Vec<NewVehicle>, Box<dyn std::error::Error>> {
        let mut reader = csv::Reader::from_reader(self.csv.file.as_file());
        let mut vehicles = Vec::new();

        for result in reader.deserialize() {
            let row: VehicleCsvRow = result?;
            vehicles.push(NewVehicle::new(
                org_id,
                PlateNumber::new(&row.plate_number)?,
                Vin::new(&row.vin)?,
                row.make,
                row.model,
                row.year,
                row.garage_id,
            ));
        }

        Ok(vehicles)
    }
}
