//! Plotting observer for visualizing solver runs and their results.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use strand_core::Observer;

/// Configuration for rendering a [`PlotObserver`] result.
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Savings policy").axes("assets", "savings").legend())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    axes: Option<(String, String)>,
    legend: bool,
    markers: bool,
}

impl ShowConfig {
    /// Creates a config with no title, no axis labels, no legend and lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Labels the x and y axes.
    #[must_use]
    pub fn axes(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axes = Some((x.into(), y.into()));
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Draws each trace as markers instead of a connected line.
    ///
    /// Useful for values that only exist on grid nodes.
    #[must_use]
    pub fn markers(mut self) -> Self {
        self.markers = true;
        self
    }
}

/// Extracts plottable data from a solver event.
///
/// Implement this on an event type local to your crate to pass
/// `&mut PlotObserver` straight to a solver. Return `None` from
/// [`x`][Plottable::x] to skip the event, or `None` in a trace slot to skip
/// that trace only. For the Brent events, which carry lifetimes and live in
/// `strand-solvers`, call [`PlotObserver::record`] from a closure instead.
pub trait Plottable<const N: usize> {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values for each trace.
    fn traces(&self) -> [Option<f64>; N];
}

/// Collects `N` named traces and displays them in an egui window.
///
/// ```ignore
/// let mut obs = PlotObserver::<2>::new(["trial x", "residual"]);
/// let mut iter = 0.0;
/// brent::solve(&model, &problem, bracket, &config, |event: &brent::Event<'_, _, _>| {
///     iter += 1.0;
///     obs.record(iter, [Some(event.x()), event.residual()]);
///     None
/// })?;
/// obs.show(ShowConfig::new().title("Root finder").legend())?;
/// ```
pub struct PlotObserver<const N: usize> {
    names: [String; N],
    data: [Vec<[f64; 2]>; N],
}

impl<const N: usize> PlotObserver<N> {
    /// Creates an empty observer with the given trace names.
    pub fn new(names: [&str; N]) -> Self {
        Self {
            names: names.map(str::to_owned),
            data: std::array::from_fn(|_| Vec::new()),
        }
    }

    /// Records one x value across all traces, skipping `None` slots.
    pub fn record(&mut self, x: f64, traces: [Option<f64>; N]) {
        for (points, y) in self.data.iter_mut().zip(traces) {
            if let Some(y) = y {
                points.push([x, y]);
            }
        }
    }

    /// Returns the points recorded for the trace at `index`.
    #[must_use]
    pub fn trace(&self, index: usize) -> &[[f64; 2]] {
        &self.data[index]
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(PlotApp { traces, config }))),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("strand_plot");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some((x_label, y_label)) = &self.config.axes {
                plot = plot.x_axis_label(x_label.clone()).y_axis_label(y_label.clone());
            }
            let markers = self.config.markers;
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let series: PlotPoints = points.iter().copied().collect();
                    if markers {
                        plot_ui.points(Points::new(series).name(name).radius(3.0));
                    } else {
                        plot_ui.line(Line::new(series).name(name));
                    }
                }
            });
        });
    }
}
