//! ASCII tree rendering for reporting hierarchies.

use crate::models::{DirectReport, Employee, ReportingStructure};

/// Render a reporting structure as an ASCII tree followed by the report count.
///
/// Example output:
/// ```text
/// John Lennon (Development Manager)
/// ├── Paul McCartney (Developer I)
/// └── Ringo Starr (Developer V)
///     ├── Pete Best (Developer II)
///     └── George Harrison (Developer III)
///
/// Number of reports: 4
/// ```
///
/// Direct reports that were not resolved are shown by id.
pub fn render_reporting_structure(structure: &ReportingStructure) -> String {
    let mut output = render_tree(&structure.employee);
    output.push('\n');
    output.push_str(&format!(
        "Number of reports: {}\n",
        structure.number_of_reports
    ));
    output
}

/// Render an employee and everything resolved below it.
pub fn render_tree(root: &Employee) -> String {
    let mut output = String::new();
    output.push_str(&label(root));
    output.push('\n');
    render_children(&mut output, root, "");
    output
}

fn label(employee: &Employee) -> String {
    format!("{} ({})", employee.full_name(), employee.position)
}

fn render_children(output: &mut String, employee: &Employee, prefix: &str) {
    let Some(reports) = &employee.direct_reports else {
        return;
    };

    for (i, report) in reports.iter().enumerate() {
        let is_last = i == reports.len() - 1;
        let branch = if is_last { "└── " } else { "├── " };

        output.push_str(prefix);
        output.push_str(branch);

        match report {
            DirectReport::Resolved(child) => {
                output.push_str(&label(child));
                output.push('\n');

                let continuation = if is_last { "    " } else { "│   " };
                render_children(output, child, &format!("{}{}", prefix, continuation));
            }
            DirectReport::Stub(reference) => {
                output.push_str(&reference.employee_id);
                output.push('\n');
            }
        }
    }
}
