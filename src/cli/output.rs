//! Rendering of session notices and reports

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::format_price;
use crate::cli::OutputFormat;
use crate::core::notice::{CloseReason, Notice, Reporter};
use crate::core::session::SessionReport;
use crate::entities::attendee::Modality;

/// Prints notices as they happen
///
/// Goes to stderr when stdout carries machine-readable output.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    quiet: bool,
    to_stderr: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool, to_stderr: bool) -> Self {
        Self { quiet, to_stderr }
    }

    fn emit(&self, line: impl std::fmt::Display) {
        if self.to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

impl Reporter for ConsoleReporter {
    fn notify(&mut self, notice: Notice) {
        if self.quiet {
            return;
        }

        match notice {
            Notice::Banner {
                name,
                capacity,
                base_price,
                modalities,
            } => {
                self.emit(style(format!("=== {} ===", name)).bold());
                self.emit(format!("Aforo máximo: {}", capacity));
                self.emit(format!("Precio base: {}", format_price(base_price)));
                self.emit(format!(
                    "Modalidades disponibles: {}",
                    modalities
                        .iter()
                        .map(Modality::label)
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                self.emit("");
            }
            Notice::NewAttempt { seat, capacity } => {
                self.emit(style(format!("=== Nuevo registro ({}/{}) ===", seat, capacity)).cyan());
            }
            Notice::InvalidName => {
                self.emit(style("El nombre no puede estar vacío.").yellow());
            }
            Notice::InvalidAge { .. } => {
                self.emit(style("Por favor, introduce un número válido mayor que 0.").yellow());
            }
            Notice::InvalidModality { .. } => {
                self.emit(style("Modalidad inválida. Inténtalo de nuevo.").red());
                self.emit("");
            }
            Notice::Registered { record } => {
                self.emit(format!(
                    "{} Inscripción realizada. Precio final: {}",
                    style("✓").green(),
                    style(format_price(record.price())).yellow()
                ));
                self.emit("");
            }
            Notice::CapacityReached => {
                self.emit(style("Se ha alcanzado el aforo máximo.").bold());
                self.emit("");
            }
            Notice::Closed { reason } => match reason {
                CloseReason::InputExhausted => {
                    self.emit("");
                    self.emit(style("No hay más entrada; se cierra el registro.").dim());
                }
                CloseReason::RetriesExhausted => {
                    self.emit("");
                    self.emit(style("Demasiados intentos inválidos; se cierra el registro.").dim());
                }
                CloseReason::CapacityReached | CloseReason::OperatorDeclined => {}
            },
        }
    }
}

/// Render a closed session's report in the requested format
pub fn render_report(report: &SessionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Auto | OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report).into_diagnostic(),
        OutputFormat::Yaml => serde_yml::to_string(report).into_diagnostic(),
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Md => Ok(render_markdown(report)),
    }
}

fn render_text(report: &SessionReport) -> String {
    let stats = &report.statistics;
    let mut output = String::new();

    output.push_str("\n=== Estadísticas del Taller ===\n");
    output.push_str(&format!("Total inscripciones: {}\n", stats.total));
    output.push_str(&format!("Precio promedio: {}\n", format_price(stats.average_price)));
    output.push_str(&format!("Precio máximo: {}\n", format_price(stats.max_price)));
    output.push_str(&format!("Precio mínimo: {}\n", format_price(stats.min_price)));
    output.push_str(&format!("Menores de edad inscritos: {}\n", stats.minors_count));

    output.push_str("\n=== Listado de Inscripciones ===\n");
    for line in report.roster() {
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&format!(
        "\nGracias por usar nuestra app. Te deseamos feliz día por parte de {}",
        report.workshop
    ));
    output
}

fn render_csv(report: &SessionReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["name", "age", "email", "domain", "modality", "price"])
        .into_diagnostic()?;

    for record in &report.attendees {
        writer
            .write_record([
                record.name().to_string(),
                record.age().to_string(),
                record.email().unwrap_or_default().to_string(),
                record.domain().to_string(),
                record.modality().label().to_string(),
                format!("{:.2}", record.price()),
            ])
            .into_diagnostic()?;
    }

    let bytes = writer.into_inner().into_diagnostic()?;
    let text = String::from_utf8(bytes).into_diagnostic()?;
    Ok(text.trim_end().to_string())
}

fn render_markdown(report: &SessionReport) -> String {
    let stats = &report.statistics;
    let mut output = format!("# {}\n\n", report.workshop);

    let mut builder = Builder::default();
    builder.push_record(["#", "Inicial", "Nombre", "Edad", "Modalidad", "Precio", "Dominio"]);
    for (i, record) in report.attendees.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            record.initial().to_string(),
            record.name().to_string(),
            record.age().to_string(),
            record.modality().to_string(),
            format_price(record.price()),
            record.domain().to_string(),
        ]);
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());

    output.push_str("\n\n## Estadísticas\n\n");
    output.push_str(&format!("- **Total inscripciones:** {}\n", stats.total));
    output.push_str(&format!("- **Precio promedio:** {}\n", format_price(stats.average_price)));
    output.push_str(&format!("- **Precio máximo:** {}\n", format_price(stats.max_price)));
    output.push_str(&format!("- **Precio mínimo:** {}\n", format_price(stats.min_price)));
    output.push_str(&format!("- **Menores de edad:** {}", stats.minors_count));
    output
}
