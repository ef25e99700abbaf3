//! Terminal presentation: notifications and the employees table.

use roster_core::{Employee, Notifier, NotifyKind};

/// Prints successes to stdout and errors to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, description: &str, kind: NotifyKind) {
        match kind {
            NotifyKind::Success => println!("✓ {}", description),
            NotifyKind::Error => eprintln!("✗ {}", description),
        }
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let cut: String = value.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}

/// Renders the employees table, or a placeholder when there are none.
pub fn render_table(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees found".to_string();
    }

    let mut out = format!(
        "{:<36}  {:<24}  {:<28}  {:<15}  {:<20}  DEPARTMENT\n",
        "ID", "NAME", "EMAIL", "PHONE", "JOB TITLE"
    );
    out.push_str(&"-".repeat(140));
    out.push('\n');

    for employee in employees {
        out.push_str(&format!(
            "{:<36}  {:<24}  {:<28}  {:<15}  {:<20}  {}\n",
            employee.id,
            truncate(&employee.full_name(), 24),
            truncate(&employee.email, 28),
            truncate(&employee.phone_number, 15),
            truncate(&employee.job_title, 20),
            employee.department
        ));
    }

    out.push_str(&format!("\nTotal: {} employee(s)", employees.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table(&[]), "No employees found");
    }

    #[test]
    fn test_table_rows() {
        let employees = vec![
            Employee::new("Ann", "Lee", "ann@example.com")
                .with_id("1")
                .with_department("Platform"),
            Employee::new("Bo", "Kim", "bo@example.com").with_id("2"),
        ];

        let table = render_table(&employees);
        assert!(table.contains("Ann Lee"));
        assert!(table.contains("Platform"));
        assert!(table.ends_with("Total: 2 employee(s)"));
    }

    #[test]
    fn test_truncate_long_values() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-job-title", 10), "a-very-...");
    }
}
