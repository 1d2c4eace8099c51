use chrono::SecondsFormat;
use serde::Serialize;

use crate::employee::models::Employee;
use crate::employee::models::Page;

pub mod create_employee;
pub mod delete_employee;
pub mod get_employee;
pub mod list_employees;
pub mod update_employee;

pub use create_employee::create_employee;
pub use delete_employee::delete_employee;
pub use get_employee::get_employee;
pub use list_employees::list_employees;
pub use update_employee::update_employee;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeData {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Employee> for EmployeeData {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            tenant_id: employee.tenant_id.to_string(),
            name: employee.name.clone(),
            email: employee.email.to_string(),
            phone_number: employee.phone_number.clone(),
            created_at: employee.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: employee.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// One page of employees with navigation hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeePageData {
    pub items: Vec<EmployeeData>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u32>,
}

impl From<&Page<Employee>> for EmployeePageData {
    fn from(page: &Page<Employee>) -> Self {
        Self {
            items: page.items.iter().map(EmployeeData::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(),
            next_page: page.next_page(),
            prev_page: page.prev_page(),
        }
    }
}
