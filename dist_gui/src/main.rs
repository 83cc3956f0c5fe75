#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]
//! # Distribuciones GUI Application
//!
//! Desktop calculator for the binomial and hypergeometric distributions,
//! built with Iced. The window is split into:
//!
//! - a sidebar to pick the calculator (Binomial, Hipergeométrica, Análisis
//!   de archivo),
//! - an input column with the parameter fields and CALCULAR / LIMPIAR,
//! - a results column with the statistics and the probability chart,
//! - a status bar with the one-line summary of the last result.
//!
//! Validation and calculation errors open a modal error dialog.

mod config;
mod ui;

use std::path::PathBuf;

use iced::widget::{column, container, row, stack};
use iced::{Element, Length, Size, Theme};
use log::{error, info};

use dist_core::calculations::binomial::{calculate, BinomialInput, BinomialResult};
use dist_core::calculations::hypergeometric::{summarize, HypergeometricSummary};
use dist_core::calculations::Distribution;
use dist_core::chart::ChartData;
use dist_core::chart_image::{binomial_image_name, hypergeometric_image_name, image_path, save_chart_png};
use dist_core::dataset::{Dataset, ACCEPTED_EXTENSIONS};
use dist_core::errors::{DistError, DistResult};
use dist_core::file_io::{report_path, save_report, DEFAULT_REPORT_NAME};
use dist_core::format::{format_fixed, hypergeometric_report, report, short_summary};
use dist_core::validation::{
    parse_desired_successes, parse_x_values, validate_hypergeometric, validate_with_population,
};

use config::AppConfig;
use ui::modal::ModalType;
use ui::shared::chart::ChartView;

const SIDEBAR_WIDTH: f32 = 190.0;
const INPUT_RATIO: f32 = 0.38;
const READY_STATUS: &str = "Listo";

/// Calculator shown in the input and results panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorSelection {
    Binomial,
    Hypergeometric,
    Dataset,
}

impl EditorSelection {
    pub const ALL: &'static [EditorSelection] = &[
        EditorSelection::Binomial,
        EditorSelection::Hypergeometric,
        EditorSelection::Dataset,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditorSelection::Binomial => Distribution::Binomial.display_name(),
            EditorSelection::Hypergeometric => Distribution::Hypergeometric.display_name(),
            EditorSelection::Dataset => "Análisis de archivo",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EditorSelection::Binomial => Distribution::Binomial.title(),
            EditorSelection::Hypergeometric => Distribution::Hypergeometric.title(),
            EditorSelection::Dataset => "ANÁLISIS DE ARCHIVO",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EditorSelection::Binomial => Distribution::Binomial.description(),
            EditorSelection::Hypergeometric => Distribution::Hypergeometric.description(),
            EditorSelection::Dataset => "Cargue un Excel o CSV, elija una columna y una categoría de éxito",
        }
    }
}

/// Raw text of the binomial fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinomialForm {
    pub n: String,
    pub p: String,
    pub population: String,
    pub x: String,
}

/// Raw text of the hypergeometric fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HypergeometricForm {
    pub population: String,
    pub successes: String,
    pub sample: String,
    pub x: String,
}

/// Loaded file and the choices made on it
#[derive(Debug, Clone, Default)]
pub struct DatasetForm {
    pub dataset: Option<Dataset>,
    pub column: Option<String>,
    pub frequencies: Vec<(String, usize)>,
    pub category: Option<String>,
    pub sample: String,
    pub x: String,
}

impl DatasetForm {
    /// Frequency of the selected category (K)
    pub fn category_count(&self) -> Option<usize> {
        let category = self.category.as_ref()?;
        self.frequencies
            .iter()
            .find(|(value, _)| value == category)
            .map(|(_, count)| *count)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation and toolbar
    Select(EditorSelection),
    ToggleDarkMode,
    ExportReport,
    ExportChart,
    /// Enter pressed in any field
    Submit,

    // Binomial
    BinomialNChanged(String),
    BinomialPChanged(String),
    BinomialPopulationChanged(String),
    BinomialXChanged(String),
    CalculateBinomial,
    ClearBinomial,

    // Hypergeometric
    HypergeometricPopulationChanged(String),
    HypergeometricSuccessesChanged(String),
    HypergeometricSampleChanged(String),
    HypergeometricXChanged(String),
    CalculateHypergeometric,
    ClearHypergeometric,

    // File analysis
    OpenDataset,
    ColumnSelected(String),
    CategorySelected(String),
    DatasetSampleChanged(String),
    DatasetXChanged(String),
    CalculateDataset,
    ClearDataset,

    CloseModal,
}

pub struct App {
    pub config: AppConfig,
    pub selection: EditorSelection,
    pub dark_mode: bool,

    pub binomial: BinomialForm,
    pub binomial_result: Option<BinomialResult>,
    pub binomial_chart: ChartView,

    pub hypergeometric: HypergeometricForm,
    pub hypergeometric_result: Option<HypergeometricSummary>,
    pub hypergeometric_chart: ChartView,

    pub dataset: DatasetForm,
    pub dataset_result: Option<HypergeometricSummary>,
    pub dataset_chart: ChartView,

    pub modal: Option<ModalType>,
    pub status: String,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            config,
            selection: EditorSelection::Binomial,
            dark_mode: config.dark_mode,
            binomial: BinomialForm::default(),
            binomial_result: None,
            binomial_chart: ChartView::new(),
            hypergeometric: HypergeometricForm::default(),
            hypergeometric_result: None,
            hypergeometric_chart: ChartView::new(),
            dataset: DatasetForm::default(),
            dataset_result: None,
            dataset_chart: ChartView::new(),
            modal: None,
            status: READY_STATUS.to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Select(selection) => {
                self.selection = selection;
                self.modal = None;
            }
            Message::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                // Cached geometry carries the old palette
                self.binomial_chart.invalidate();
                self.hypergeometric_chart.invalidate();
                self.dataset_chart.invalidate();
                info!("theme set to {}", if self.dark_mode { "dark" } else { "light" });
            }
            Message::ExportReport => self.export_report(),
            Message::ExportChart => self.export_chart(),
            Message::Submit => match self.selection {
                EditorSelection::Binomial => self.calculate_binomial(),
                EditorSelection::Hypergeometric => self.calculate_hypergeometric(),
                EditorSelection::Dataset => self.calculate_dataset(),
            },

            Message::BinomialNChanged(value) => self.binomial.n = value,
            Message::BinomialPChanged(value) => self.binomial.p = value,
            Message::BinomialPopulationChanged(value) => self.binomial.population = value,
            Message::BinomialXChanged(value) => self.binomial.x = value,
            Message::CalculateBinomial => self.calculate_binomial(),
            Message::ClearBinomial => {
                self.binomial = BinomialForm::default();
                self.binomial_result = None;
                self.binomial_chart.clear();
                self.status = READY_STATUS.to_string();
            }

            Message::HypergeometricPopulationChanged(value) => self.hypergeometric.population = value,
            Message::HypergeometricSuccessesChanged(value) => self.hypergeometric.successes = value,
            Message::HypergeometricSampleChanged(value) => self.hypergeometric.sample = value,
            Message::HypergeometricXChanged(value) => self.hypergeometric.x = value,
            Message::CalculateHypergeometric => self.calculate_hypergeometric(),
            Message::ClearHypergeometric => {
                self.hypergeometric = HypergeometricForm::default();
                self.hypergeometric_result = None;
                self.hypergeometric_chart.clear();
                self.status = READY_STATUS.to_string();
            }

            Message::OpenDataset => self.open_dataset(),
            Message::ColumnSelected(column) => self.select_column(column),
            Message::CategorySelected(category) => {
                self.dataset.category = Some(category);
                self.dataset_result = None;
                self.dataset_chart.clear();
            }
            Message::DatasetSampleChanged(value) => self.dataset.sample = value,
            Message::DatasetXChanged(value) => self.dataset.x = value,
            Message::CalculateDataset => self.calculate_dataset(),
            Message::ClearDataset => {
                self.dataset = DatasetForm::default();
                self.dataset_result = None;
                self.dataset_chart.clear();
                self.status = READY_STATUS.to_string();
            }

            Message::CloseModal => self.modal = None,
        }
    }

    fn show_error(&mut self, err: DistError) {
        if err.is_user_error() {
            info!("{}: {}", err.error_code(), err);
        } else {
            error!("{}: {}", err.error_code(), err);
        }
        self.modal = Some(ModalType::Error {
            title: err.title().to_string(),
            message: err.to_string(),
        });
    }

    fn calculate_binomial(&mut self) {
        match run_binomial(&self.binomial) {
            Ok(result) => {
                self.binomial_chart.set(ChartData::binomial(&result));
                self.status = short_summary(&result);
                self.binomial_result = Some(result);
            }
            Err(err) => self.show_error(err),
        }
    }

    fn calculate_hypergeometric(&mut self) {
        match run_hypergeometric(&self.hypergeometric) {
            Ok(summary) => {
                self.hypergeometric_chart.set(ChartData::hypergeometric(&summary));
                self.status = summary_status(&summary);
                self.hypergeometric_result = Some(summary);
            }
            Err(err) => self.show_error(err),
        }
    }

    fn calculate_dataset(&mut self) {
        match run_dataset(&self.dataset) {
            Ok(summary) => {
                self.dataset_chart.set(ChartData::hypergeometric(&summary));
                self.status = summary_status(&summary);
                self.dataset_result = Some(summary);
            }
            Err(err) => self.show_error(err),
        }
    }

    fn open_dataset(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Seleccionar archivo de datos")
            .add_filter("Archivos de datos", ACCEPTED_EXTENSIONS)
            .add_filter("Archivos Excel", &["xlsx", "xls"])
            .add_filter("Archivos CSV", &["csv"])
            .pick_file()
        else {
            return;
        };

        match Dataset::from_path(&path) {
            Ok(dataset) => {
                self.status = dataset.summary().label();
                self.dataset = DatasetForm {
                    dataset: Some(dataset),
                    ..DatasetForm::default()
                };
                self.dataset_result = None;
                self.dataset_chart.clear();
            }
            Err(err) => self.show_error(err),
        }
    }

    fn select_column(&mut self, column: String) {
        let Some(dataset) = &self.dataset.dataset else {
            return;
        };
        match dataset.frequencies(&column) {
            Ok(frequencies) => {
                self.dataset.frequencies = frequencies;
                self.dataset.column = Some(column);
                self.dataset.category = None;
                self.dataset_result = None;
                self.dataset_chart.clear();
            }
            Err(err) => self.show_error(err),
        }
    }

    /// Text report for whatever the current panel shows
    fn current_report(&self) -> Option<String> {
        let settings = &self.config.display;
        match self.selection {
            EditorSelection::Binomial => self.binomial_result.as_ref().map(|r| report(r, settings)),
            EditorSelection::Hypergeometric => self
                .hypergeometric_result
                .as_ref()
                .map(|s| hypergeometric_report(s, settings)),
            EditorSelection::Dataset => self.dataset_result.as_ref().map(|s| hypergeometric_report(s, settings)),
        }
    }

    pub fn has_report(&self) -> bool {
        match self.selection {
            EditorSelection::Binomial => self.binomial_result.is_some(),
            EditorSelection::Hypergeometric => self.hypergeometric_result.is_some(),
            EditorSelection::Dataset => self.dataset_result.is_some(),
        }
    }

    fn export_report(&mut self) {
        let Some(contents) = self.current_report() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title("Exportar resultados")
            .set_file_name(DEFAULT_REPORT_NAME)
            .add_filter("Texto", &["txt"])
            .save_file()
        else {
            return;
        };

        let path: PathBuf = report_path(&path);
        match save_report(&contents, &path) {
            Ok(()) => self.status = format!("Resultados exportados a {}", path.display()),
            Err(err) => self.show_error(err),
        }
    }

    /// Chart of the current panel with its default image file name
    fn current_chart(&self) -> Option<(&ChartData, String)> {
        match self.selection {
            EditorSelection::Binomial => {
                let result = self.binomial_result.as_ref()?;
                Some((self.binomial_chart.data()?, binomial_image_name(result)))
            }
            EditorSelection::Hypergeometric => {
                let summary = self.hypergeometric_result.as_ref()?;
                Some((self.hypergeometric_chart.data()?, hypergeometric_image_name(summary)))
            }
            EditorSelection::Dataset => {
                let summary = self.dataset_result.as_ref()?;
                Some((self.dataset_chart.data()?, hypergeometric_image_name(summary)))
            }
        }
    }

    fn export_chart(&mut self) {
        let Some((data, default_name)) = self.current_chart() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_title("Guardar gráfica")
            .set_file_name(&default_name)
            .add_filter("Imagen PNG", &["png"])
            .save_file()
        else {
            return;
        };

        let path = image_path(&path);
        match save_chart_png(data, &path) {
            Ok(()) => self.status = format!("Gráfica guardada en {}", path.display()),
            Err(err) => self.show_error(err),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body = row![
            ui::sidebar::view_sidebar(self.selection, SIDEBAR_WIDTH),
            ui::input_panel::view_input_panel(self, INPUT_RATIO),
            ui::results_panel::view_results_panel(self, INPUT_RATIO),
        ]
        .spacing(8)
        .height(Length::Fill);

        let main = container(
            column![
                ui::toolbar::view_header(self.selection),
                ui::toolbar::view_toolbar(self.dark_mode, self.has_report()),
                body,
                ui::status_bar::view_status_bar(self.selection, &self.status),
            ]
            .spacing(6),
        )
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill);

        match &self.modal {
            Some(modal) => stack![main, ui::modal::view_backdrop(), ui::modal::view_modal(modal)].into(),
            None => main.into(),
        }
    }
}

fn run_binomial(form: &BinomialForm) -> DistResult<BinomialResult> {
    let params = validate_with_population(&form.n, &form.p, &form.population)?;
    let x_values = parse_x_values(&form.x, params.n)?;
    calculate(&BinomialInput::new(params, x_values))
}

fn run_hypergeometric(form: &HypergeometricForm) -> DistResult<HypergeometricSummary> {
    let params = validate_hypergeometric(&form.population, &form.successes, &form.sample)?;
    let x = parse_desired_successes(&form.x)?;
    summarize(params.population, params.successes, params.sample, x)
}

fn run_dataset(form: &DatasetForm) -> DistResult<HypergeometricSummary> {
    let dataset = form
        .dataset
        .as_ref()
        .ok_or_else(|| DistError::missing_field("archivo de datos"))?;
    if form.column.is_none() {
        return Err(DistError::missing_field("columna"));
    }
    let successes = form
        .category_count()
        .ok_or_else(|| DistError::missing_field("categoría de éxito"))?;

    let params = validate_hypergeometric(
        &dataset.row_count().to_string(),
        &successes.to_string(),
        &form.sample,
    )?;
    let x = parse_desired_successes(&form.x)?;
    summarize(params.population, params.successes, params.sample, x)
}

fn summary_status(summary: &HypergeometricSummary) -> String {
    let params = &summary.params;
    format!(
        "{}(N={}, K={}, n={}) | P(X={})={} | μ={}",
        summary.model,
        params.population,
        params.successes,
        params.sample,
        summary.x,
        format_fixed(summary.probability_x, 6),
        format_fixed(summary.mean, 4)
    )
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    info!(
        "starting Distribuciones ({}x{}, {} theme)",
        config.window_width,
        config.window_height,
        if config.dark_mode { "dark" } else { "light" }
    );

    iced::application(move || App::new(config), App::update, App::view)
        .title("Distribuciones - Calculadora de Probabilidad")
        .theme(App::theme)
        .window_size(Size::new(config.window_width, config.window_height))
        .run()
}
