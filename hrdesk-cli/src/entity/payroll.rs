//! Payroll records
//!
//! Monetary fields are kept as strings; the store does not enforce a
//! numeric schema and neither do we.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Entity, field_str};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub employee_name: String,
    pub salary: String,
    pub deductions: String,
    pub net_pay: String,
    pub pay_period_start: String,
    pub pay_period_end: String,
    pub status: String,
}

impl Entity for Payroll {
    const COLLECTION: &'static str = "Payrolls";
    const SHEET_NAME: &'static str = "Payrolls";
    const NOUN: &'static str = "payroll record";
    const NOUN_PLURAL: &'static str = "payroll records";
    const COLUMNS: &'static [(&'static str, &'static str)] = &[
        ("employeeName", "Employee Name"),
        ("salary", "Salary"),
        ("deductions", "Deductions"),
        ("netPay", "Net Pay"),
        ("payPeriodStart", "Pay Period Start"),
        ("payPeriodEnd", "Pay Period End"),
        ("status", "Status"),
    ];
    const FORM_FIELDS: &'static [(&'static str, &'static str)] = Self::COLUMNS;
    const REQUIRED_COLUMNS: &'static [&'static str] = &["employeeName", "salary"];

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            employee_name: field_str(fields, "employeeName"),
            salary: field_str(fields, "salary"),
            deductions: field_str(fields, "deductions"),
            net_pay: field_str(fields, "netPay"),
            pay_period_start: field_str(fields, "payPeriodStart"),
            pay_period_end: field_str(fields, "payPeriodEnd"),
            status: field_str(fields, "status"),
        }
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("employeeName".to_string(), Value::String(self.employee_name.clone()));
        fields.insert("salary".to_string(), Value::String(self.salary.clone()));
        fields.insert("deductions".to_string(), Value::String(self.deductions.clone()));
        fields.insert("netPay".to_string(), Value::String(self.net_pay.clone()));
        fields.insert(
            "payPeriodStart".to_string(),
            Value::String(self.pay_period_start.clone()),
        );
        fields.insert("payPeriodEnd".to_string(), Value::String(self.pay_period_end.clone()));
        fields.insert("status".to_string(), Value::String(self.status.clone()));
        fields
    }

    fn label(&self) -> &str {
        &self.employee_name
    }
}
