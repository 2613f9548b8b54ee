//! Page layouts for each section kind.

use crate::error::EkkoError;
use crate::render::geometry::{
    Point, Rect, Rgb, Shape, Table, TextStyle, BLACK, BRAND_GREEN, GREY, PAGE_HEIGHT, PAGE_WIDTH,
    WHITE,
};
use crate::render::RenderBackend;
use crate::report::layout::NarrativeCard;
use crate::report::sections::{CatalogSection, CoverSection, DetailSection, SummarySection};
use crate::report::FooterSpec;

const CENTER_X: f64 = PAGE_WIDTH / 2.0;
const MARGIN_X: f64 = 20.0;
const TABLE_X: f64 = 14.0;
const CARD_TEXT: Rgb = Rgb::new(40, 40, 40);
const CARD_FILL: Rgb = Rgb::new(248, 250, 252);
const CARD_BORDER: Rgb = Rgb::new(220, 220, 220);
const ALERT_RED: Rgb = Rgb::new(239, 68, 68);
const PLAN_BLUE: Rgb = Rgb::new(59, 130, 246);
const ORANGE: Rgb = Rgb::new(249, 115, 22);
const PURPLE: Rgb = Rgb::new(139, 92, 246);

/// Bands in the cover's vertical gradient.
const COVER_BANDS: usize = 33;
/// Height of a detail page's colored header.
const DETAIL_HEADER_HEIGHT: usize = 35;

fn rounded(rect: Rect, fill: Option<Rgb>, stroke: Option<Rgb>, radius: f64) -> Shape {
    Shape::Rect {
        rect,
        fill,
        stroke,
        radius,
    }
}

fn fill_band(backend: &mut dyn RenderBackend, y: f64, height: f64, color: Rgb) -> Result<(), EkkoError> {
    backend.draw_shape(&rounded(Rect::new(0.0, y, PAGE_WIDTH, height), Some(color), None, 0.0))
}

pub fn draw_cover(backend: &mut dyn RenderBackend, cover: &CoverSection) -> Result<(), EkkoError> {
    let band = PAGE_HEIGHT / COVER_BANDS as f64;
    for i in 0..COVER_BANDS {
        let y = band * i as f64;
        let t = y / PAGE_HEIGHT;
        let color = Rgb::new(
            (34.0 + t * 30.0) as u8,
            (197.0 - t * 50.0) as u8,
            (94.0 - t * 30.0) as u8,
        );
        fill_band(backend, y, band, color)?;
    }

    backend.draw_text(
        &cover.brand,
        Point::new(CENTER_X, 80.0),
        TextStyle::new(50.0, WHITE).bold().centered(),
    )?;
    backend.draw_shape(&Shape::Line {
        from: Point::new(60.0, 90.0),
        to: Point::new(150.0, 90.0),
        color: WHITE,
        width: 2.0,
    })?;
    backend.draw_text(
        &cover.title,
        Point::new(CENTER_X, 110.0),
        TextStyle::new(22.0, WHITE).centered(),
    )?;
    backend.draw_text(
        &cover.subtitle,
        Point::new(CENTER_X, 122.0),
        TextStyle::new(14.0, WHITE).centered(),
    )?;

    backend.draw_shape(&rounded(
        Rect::new(30.0, 145.0, 150.0, 80.0),
        Some(WHITE),
        Some(Rgb::new(200, 200, 200)),
        5.0,
    ))?;
    backend.draw_text(
        &cover.producer_heading,
        Point::new(CENTER_X, 160.0),
        TextStyle::new(14.0, BRAND_GREEN).bold().centered(),
    )?;
    let mut y = 175.0;
    for line in &cover.producer_lines {
        backend.draw_text(line, Point::new(CENTER_X, y), TextStyle::new(11.0, GREY).centered())?;
        y += 13.0;
    }

    let institution_styles = [10.0, 8.0];
    let mut y = 270.0;
    for (line, size) in cover.institution_lines.iter().zip(institution_styles) {
        backend.draw_text(line, Point::new(CENTER_X, y), TextStyle::new(size, WHITE).centered())?;
        y += 8.0;
    }
    Ok(())
}

pub fn draw_summary(
    backend: &mut dyn RenderBackend,
    summary: &SummarySection,
) -> Result<(), EkkoError> {
    let mut y = 20.0;
    backend.draw_text(&summary.title, Point::new(MARGIN_X, y), TextStyle::new(18.0, BRAND_GREEN))?;
    y += 10.0;

    let table = Table {
        header: summary.header.clone(),
        rows: summary.rows.iter().map(|r| r.cells()).collect(),
        header_fill: BRAND_GREEN,
        font_size: 10.0,
    };
    backend.draw_table(&table, Point::new(TABLE_X, y))?;
    y += table.height() + 15.0;

    backend.draw_text(
        &summary.actions_heading,
        Point::new(MARGIN_X, y),
        TextStyle::new(14.0, ALERT_RED),
    )?;
    y += 8.0;
    for line in summary.action_lines() {
        backend.draw_text(&line, Point::new(25.0, y), TextStyle::new(10.0, BLACK))?;
        y += 6.0;
    }
    Ok(())
}

fn draw_card(
    backend: &mut dyn RenderBackend,
    card: &NarrativeCard,
    y: f64,
    height: f64,
    accent: Rgb,
) -> Result<(), EkkoError> {
    backend.draw_shape(&rounded(
        Rect::new(15.0, y, 180.0, height),
        Some(CARD_FILL),
        Some(CARD_BORDER),
        3.0,
    ))?;
    backend.draw_text(
        &card.heading,
        Point::new(MARGIN_X, y + 7.0),
        TextStyle::new(11.0, accent).bold(),
    )?;
    let mut line_y = y + 14.0;
    for line in &card.lines {
        backend.draw_text(line, Point::new(MARGIN_X, line_y), TextStyle::new(9.0, CARD_TEXT))?;
        line_y += 4.0;
    }
    Ok(())
}

pub fn draw_detail(backend: &mut dyn RenderBackend, detail: &DetailSection) -> Result<(), EkkoError> {
    let color = Rgb::from_hex(&detail.color);
    for i in 0..DETAIL_HEADER_HEIGHT {
        let factor = i as f64 / DETAIL_HEADER_HEIGHT as f64;
        fill_band(backend, i as f64, 1.0, color.darken(factor * 0.3))?;
    }
    backend.draw_text(
        &detail.title,
        Point::new(CENTER_X, 22.0),
        TextStyle::new(20.0, WHITE).bold().centered(),
    )?;

    let mut y = 45.0;
    backend.draw_shape(&rounded(
        Rect::new(15.0, y, 85.0, 35.0),
        Some(Rgb::new(250, 250, 250)),
        Some(color),
        4.0,
    ))?;
    backend.draw_text(
        &detail.value_label,
        Point::new(57.5, y + 23.0),
        TextStyle::new(24.0, color).bold().centered(),
    )?;
    backend.embed_image(&detail.chart, Rect::new(110.0, y, 85.0, 35.0))?;

    y += 45.0;
    draw_card(backend, &detail.analysis, y, 28.0, color)?;
    y += 33.0;
    draw_card(backend, &detail.recommendation, y, 24.0, PLAN_BLUE)?;
    y += 29.0;
    draw_card(backend, &detail.correction, y, 24.0, PURPLE)?;
    y += 29.0;

    backend.draw_shape(&rounded(
        Rect::new(15.0, y, 180.0, 32.0),
        Some(Rgb::new(255, 251, 245)),
        Some(ORANGE),
        3.0,
    ))?;
    backend.draw_text(
        &detail.products_heading,
        Point::new(MARGIN_X, y + 7.0),
        TextStyle::new(11.0, ORANGE).bold(),
    )?;
    let mut py = y + 13.0;
    for line in detail.product_lines() {
        backend.draw_text(&line, Point::new(22.0, py), TextStyle::new(8.0, CARD_TEXT))?;
        py += 5.0;
    }
    Ok(())
}

pub fn draw_catalog(
    backend: &mut dyn RenderBackend,
    catalog: &CatalogSection,
) -> Result<(), EkkoError> {
    let mut y = 20.0;
    backend.draw_text(&catalog.title, Point::new(MARGIN_X, y), TextStyle::new(18.0, BRAND_GREEN))?;
    y += 10.0;

    let table = Table {
        header: catalog.header.clone(),
        rows: catalog.rows.iter().map(|r| r.cells()).collect(),
        header_fill: BRAND_GREEN,
        font_size: 9.0,
    };
    backend.draw_table(&table, Point::new(TABLE_X, y))?;
    y += table.height() + 15.0;

    backend.draw_text(&catalog.plan_heading, Point::new(MARGIN_X, y), TextStyle::new(14.0, PLAN_BLUE))?;
    y += 8.0;
    for step in &catalog.plan_steps {
        backend.draw_text(step, Point::new(25.0, y), TextStyle::new(10.0, BLACK))?;
        y += 6.0;
    }
    Ok(())
}

/// Footer rule, page counter and brand marks for one page.
pub fn draw_footer(
    backend: &mut dyn RenderBackend,
    footer: &FooterSpec,
    page: usize,
    total: usize,
) -> Result<(), EkkoError> {
    backend.draw_shape(&Shape::Line {
        from: Point::new(MARGIN_X, 285.0),
        to: Point::new(190.0, 285.0),
        color: BRAND_GREEN,
        width: 0.5,
    })?;
    backend.draw_text(
        &footer.page_label(page, total),
        Point::new(CENTER_X, 290.0),
        TextStyle::new(8.0, GREY).centered(),
    )?;
    backend.draw_text(
        &footer.brand,
        Point::new(MARGIN_X, 290.0),
        TextStyle::new(8.0, BRAND_GREEN).bold(),
    )?;
    backend.draw_text(
        &footer.institution,
        Point::new(190.0, 290.0),
        TextStyle::new(8.0, GREY).right(),
    )
}
