//! Device command handlers. Everything here reads the catalog; no
//! further requests are made.

use tabled::Tabled;

use huectl_core::{Bridge, Device, ServiceRef};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Archetype")]
    archetype: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Services")]
    services: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            name: d.name().to_owned(),
            archetype: d.device_type.to_string(),
            product: d.product_name().unwrap_or("-").to_owned(),
            id: d.id().to_string(),
            services: d
                .services()
                .map(|s| s.rtype)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "Name")]
    name: String,
}

fn detail(d: &Device) -> String {
    let product = d.data.product_data.as_ref();
    let field = |f: Option<&String>| f.map_or("-", String::as_str).to_owned();

    let mut lines = vec![
        format!("ID:        {}", d.id()),
        format!("Name:      {}", d.name()),
        format!("Archetype: {}", d.device_type),
        format!("Product:   {}", d.product_name().unwrap_or("-")),
        format!("Model:     {}", field(product.and_then(|p| p.model_id.as_ref()))),
        format!(
            "Software:  {}",
            field(product.and_then(|p| p.software_version.as_ref()))
        ),
        "Services:".to_owned(),
    ];
    lines.extend(d.services().map(|s| format!("  {:<24} {}", s.rtype, s.rid)));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(bridge: &Bridge, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = bridge.catalog();

    match args.command {
        DevicesCommand::List { archetype } => {
            let devices: Vec<&Device> = catalog
                .devices()
                .iter()
                .filter(|d| archetype.as_deref().is_none_or(|a| d.device_type.as_str() == a))
                .collect();
            let out = output::render_list(
                global.output,
                &devices,
                |d| DeviceRow::from(*d),
                |d| d.name().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { name } => {
            let device = catalog
                .device_by_name(&name)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "device".into(),
                    identifier: name.clone(),
                    list_command: "devices list".into(),
                })?;
            let out = output::render_single(global.output, device, detail, |d| d.id().to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Names { archetype } => {
            let names = catalog.fetch_names_of_type(&archetype);
            let out = output::render_list(
                global.output,
                &names,
                |n| NameRow { name: n.clone() },
                Clone::clone,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Rid { name, rtype } => {
            let service = catalog.device_rid(&name, &rtype).ok_or_else(|| {
                if catalog.device_by_name(&name).is_some() {
                    CliError::NotFound {
                        resource_type: format!("{rtype} service of"),
                        identifier: name.clone(),
                        list_command: "devices list".into(),
                    }
                } else {
                    CliError::NotFound {
                        resource_type: "device".into(),
                        identifier: name.clone(),
                        list_command: "devices list".into(),
                    }
                }
            })?;
            let out = output::render_single(
                global.output,
                &service,
                |s: &ServiceRef| format!("{} {}", s.rtype, s.rid),
                |s| s.rid.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
