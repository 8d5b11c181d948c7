use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{
    vec2, Align2, Color32, FontId, Mesh, Painter, Pos2, RichText, Sense, Shape, Ui,
};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::{diverging_color, generate_palette};
use crate::data::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// The four analysis charts in a 2×2 arrangement.
pub fn charts_grid(ui: &mut Ui, view: &DashboardView, country_role: &str) {
    ui.columns(2, |cols: &mut [Ui]| {
        top_roles_chart(&mut cols[0], view);
        salary_histogram(&mut cols[1], view);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        work_mode_donut(&mut cols[0], view);
        country_salary_chart(&mut cols[1], view, country_role);
    });
}

fn empty_notice(ui: &mut Ui, what: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("No data to display for {what}."))
                .italics()
                .weak(),
        );
    });
    ui.add_space(24.0);
}

/// Label integer category positions with the given names, hide everything
/// else on that axis.
fn category_axis_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 0.2 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Top roles by mean salary (horizontal bars)
// ---------------------------------------------------------------------------

fn top_roles_chart(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Top 10 roles by average salary");
    if view.top_roles.is_empty() {
        empty_notice(ui, "the role chart");
        return;
    }

    let bars: Vec<Bar> = view
        .top_roles
        .iter()
        .enumerate()
        .map(|(i, rm)| {
            Bar::new(i as f64, rm.mean_salary)
                .width(0.7)
                .name(&rm.role)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();
    let labels: Vec<String> = view.top_roles.iter().map(|rm| rm.role.clone()).collect();

    Plot::new("top_roles_chart")
        .height(280.0)
        .x_axis_label("Average annual salary (USD)")
        .y_axis_formatter(category_axis_formatter(labels))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Salary distribution (histogram)
// ---------------------------------------------------------------------------

fn salary_histogram(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Annual salary distribution");
    if view.histogram.is_empty() {
        empty_notice(ui, "the distribution chart");
        return;
    }

    let bars: Vec<Bar> = view
        .histogram
        .iter()
        .map(|bin| {
            // A degenerate single-bucket histogram has zero width; give the
            // bar a nominal one so it stays visible.
            let span = bin.upper - bin.lower;
            let width = if span > 0.0 { span } else { 1.0 };
            Bar::new((bin.lower + bin.upper) * 0.5, bin.count as f64)
                .width(width)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    Plot::new("salary_histogram")
        .height(280.0)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Work mode split (donut)
// ---------------------------------------------------------------------------

fn work_mode_donut(ui: &mut Ui, view: &DashboardView) {
    ui.strong("Work mode split");
    if view.work_modes.is_empty() {
        empty_notice(ui, "the work mode chart");
        return;
    }

    let total: usize = view.work_modes.iter().map(|m| m.count).sum();
    let colors = generate_palette(view.work_modes.len());

    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), 280.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let r_outer = rect.height().min(rect.width()) * 0.38;
    let r_inner = r_outer * 0.5;

    // Start at twelve o'clock and sweep clockwise.
    let mut angle = -FRAC_PI_2;
    for (slice, color) in view.work_modes.iter().zip(colors) {
        let fraction = slice.count as f32 / total as f32;
        let sweep = fraction * TAU;
        draw_ring_slice(&painter, center, r_inner, r_outer, angle, angle + sweep, color);

        let mid = angle + sweep * 0.5;
        let label_radius = if fraction >= 0.08 {
            (r_inner + r_outer) * 0.5
        } else {
            r_outer + 24.0
        };
        let label_pos = center + vec2(mid.cos(), mid.sin()) * label_radius;
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            format!("{}\n{:.1}%", slice.mode, fraction * 100.0),
            FontId::proportional(12.0),
            Color32::WHITE,
        );

        angle += sweep;
    }
}

/// Fill one annular sector with a triangle-strip mesh.
fn draw_ring_slice(
    painter: &Painter,
    center: Pos2,
    r_inner: f32,
    r_outer: f32,
    a0: f32,
    a1: f32,
    color: Color32,
) {
    let steps = (((a1 - a0) / TAU * 64.0).ceil() as usize).max(2);
    let mut mesh = Mesh::default();
    for i in 0..=steps {
        let t = a0 + (a1 - a0) * i as f32 / steps as f32;
        let dir = vec2(t.cos(), t.sin());
        mesh.colored_vertex(center + dir * r_outer, color);
        mesh.colored_vertex(center + dir * r_inner, color);
    }
    for i in 0..steps {
        let base = (2 * i) as u32;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }
    painter.add(Shape::mesh(mesh));
}

// ---------------------------------------------------------------------------
// Mean salary by country for one role (diverging-colored bars)
// ---------------------------------------------------------------------------

fn country_salary_chart(ui: &mut Ui, view: &DashboardView, country_role: &str) {
    ui.strong(format!("Average {country_role} salary by country"));
    if view.country_means.is_empty() {
        empty_notice(ui, "the country chart");
        return;
    }

    let lo = view
        .country_means
        .iter()
        .map(|cm| cm.mean_salary)
        .fold(f64::INFINITY, f64::min);
    let hi = view
        .country_means
        .iter()
        .map(|cm| cm.mean_salary)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = (hi - lo).max(f64::EPSILON);

    let bars: Vec<Bar> = view
        .country_means
        .iter()
        .enumerate()
        .map(|(i, cm)| {
            let t = ((cm.mean_salary - lo) / span) as f32;
            Bar::new(i as f64, cm.mean_salary)
                .width(0.7)
                .name(&cm.country)
                .fill(diverging_color(t))
        })
        .collect();
    let labels: Vec<String> = view
        .country_means
        .iter()
        .map(|cm| cm.country.clone())
        .collect();

    let height = (view.country_means.len() as f32 * 18.0).clamp(220.0, 420.0);
    Plot::new("country_salary_chart")
        .height(height)
        .x_axis_label("Average annual salary (USD)")
        .y_axis_formatter(category_axis_formatter(labels))
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}
