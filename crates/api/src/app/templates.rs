//! Page templates, compiled into the binary.

use tera::Tera;

const TEMPLATES: [(&str, &str); 7] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("form.html", include_str!("../../templates/form.html")),
    ("view.html", include_str!("../../templates/view.html")),
    (
        "packing_list_print.html",
        include_str!("../../templates/packing_list_print.html"),
    ),
    (
        "proforma_invoice_print.html",
        include_str!("../../templates/proforma_invoice_print.html"),
    ),
    (
        "export_invoice_print.html",
        include_str!("../../templates/export_invoice_print.html"),
    ),
];

pub fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}
