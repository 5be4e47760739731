//! Command-line JSON front end for the packing core.
//!
//! Parses one packing request, validates it at the boundary the core
//! deliberately stays outside of, invokes [`stowline::Packer`], and
//! serializes the response in the original system's wire shape.

mod wire;

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use stowline::bin::PackingDirection;
use stowline::item::{validate_item_fields, Item, ItemHandle};
use stowline::registry::{ItemRegistry, SortMethod};
use stowline::{Packer, PackerSpec};

use wire::{BinResponse, ItemResponse, Request, Response};

#[derive(Parser, Debug)]
#[command(name = "stowline", about = "3D bin packer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Pack one JSON request and print the JSON response.
    Pack {
        /// Input file, or "-" for stdin.
        #[arg(long, default_value = "-")]
        input: String,
        /// Output file, or "-" for stdout.
        #[arg(long, default_value = "-")]
        output: String,
        #[arg(long, default_value_t = true)]
        include_bins: bool,
        #[arg(long, default_value_t = true)]
        include_items: bool,
        #[arg(long, default_value_t = true)]
        dimensions_after: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Pack {
            input,
            output,
            include_bins,
            include_items,
            dimensions_after,
        } => run_pack(&input, &output, include_bins, include_items, dimensions_after),
    }
}

fn run_pack(input: &str, output: &str, include_bins: bool, include_items: bool, dimensions_after: bool) -> Result<()> {
    let raw = read_input(input)?;
    let request: Request = serde_json::from_str(&raw).context("parsing packing request")?;

    log::info!(
        "packing {} items into bin type {:?}",
        request.items.len(),
        request.bin.type_tag
    );

    let (mut registry, handles, spec) = build_request(request)?;

    let mut packer = Packer::new(spec);
    packer.pack(&mut registry, handles);

    if packer.exception() {
        log::warn!("every item unfittable, no bins produced");
    }

    let response = build_response(&packer, &registry, include_bins, include_items, dimensions_after);
    write_output(output, &response)
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {path}"))
    }
}

fn write_output(path: &str, response: &Response) -> Result<()> {
    let json = serde_json::to_string_pretty(response)?;
    if path == "-" {
        io::stdout().write_all(json.as_bytes())?;
        io::stdout().write_all(b"\n")?;
    } else {
        fs::write(path, json).with_context(|| format!("writing {path}"))?;
    }
    Ok(())
}

/// Validates raw fields and builds the registry, handle list, and packer
/// spec. This is the parsing boundary: malformed input is rejected here,
/// never inside the core.
fn build_request(request: Request) -> Result<(ItemRegistry, Vec<ItemHandle>, PackerSpec)> {
    if request.bin.width <= 0.0 || request.bin.depth <= 0.0 || request.bin.height <= 0.0 {
        bail!("bin dimensions must be positive");
    }
    if request.bin.maxWeight < 0.0 {
        bail!("bin maxWeight must be non-negative");
    }

    let item_limit = request.bin.itemLimit.unwrap_or(0);
    if item_limit != 0 && request.items.len() > item_limit as usize {
        bail!("item count {} exceeds itemLimit {}", request.items.len(), item_limit);
    }

    let mut registry = ItemRegistry::new();
    let mut handles = Vec::with_capacity(request.items.len());
    for raw in request.items {
        let allowed_rotations = raw.allowedRotations.clone();
        let allowed_rotations_str = allowed_rotations.clone().unwrap_or_else(|| "012345".to_string());
        validate_item_fields(
            raw.width,
            raw.depth,
            raw.height,
            raw.weight,
            &allowed_rotations_str,
            raw.gravityStrength,
        )
        .with_context(|| format!("invalid item {:?}", raw.id))?;

        let item = Item::new(
            raw.id.unwrap_or_default(),
            raw.width,
            raw.depth,
            raw.height,
            raw.weight,
            raw.itemConsKey.unwrap_or_default(),
            allowed_rotations,
            raw.gravityStrength,
        );
        handles.push(registry.add_item(item));
    }

    let gravity_strength = request.bin.gravityStrength.unwrap_or(0.0);
    if !(0.0..=100.0).contains(&gravity_strength) {
        bail!("bin gravityStrength must be within [0, 100]");
    }

    let packing_direction = match request.bin.packingDirection.as_deref() {
        Some("BACKTOFRONT") => PackingDirection::BackToFront,
        _ => PackingDirection::BottomUp,
    };

    let sort_method = SortMethod::parse(request.bin.sortMethod.as_deref().unwrap_or("VOLUME"));

    let available_bins = match request.bin.nrOfAvailableBins {
        Some(0) | None => None,
        Some(n) => Some(n),
    };

    let spec = PackerSpec {
        type_tag: request.bin.type_tag,
        width: request.bin.width,
        depth: request.bin.depth,
        height: request.bin.height,
        max_weight: request.bin.maxWeight,
        gravity_strength,
        packing_direction,
        available_bins,
        sort_method,
    };

    Ok((registry, handles, spec))
}

fn item_response(registry: &ItemRegistry, handle: ItemHandle, dimensions_after: bool) -> ItemResponse {
    let item = registry.get(handle);
    let (width, depth, height) = if dimensions_after {
        (item.width, item.depth, item.height)
    } else {
        (item.original_width, item.original_depth, item.original_height)
    };
    ItemResponse {
        id: item.id.clone(),
        width,
        depth,
        height,
        weight: item.weight,
        volume: item.volume,
        itemConsKey: if item.item_cons_key.is_empty() {
            None
        } else {
            Some(item.item_cons_key.clone())
        },
        allowedRotations: item.allowed_rotations.clone(),
        xCoordinate: item.position[0],
        yCoordinate: item.position[1],
        zCoordinate: item.position[2],
        rotationType: item.rotation_type,
        rotationTypeDescription: item.rotation_type_description.clone(),
    }
}

fn build_response(
    packer: &Packer,
    registry: &ItemRegistry,
    include_bins: bool,
    include_items: bool,
    dimensions_after: bool,
) -> Response {
    if packer.exception() {
        return Response {
            exception: Some("Every single item exceeds the bin capacity. None of the items could be packed.".to_string()),
            requiredNrOfBins: None,
            totalVolumeUtil: None,
            totalWeightUtil: None,
            unfittedItems: Vec::new(),
            packedBins: Vec::new(),
        };
    }

    let unfitted_items = packer
        .unfitted_items()
        .into_iter()
        .map(|h| item_response(registry, h, dimensions_after))
        .collect();

    let packed_bins = if include_bins {
        packer
            .clusters()
            .iter()
            .flat_map(|c| c.bins.iter())
            .map(|bin| BinResponse {
                id: bin.id,
                type_tag: bin.type_tag.clone(),
                nrOfItems: bin.items.len(),
                maxWidth: bin.width,
                maxDepth: bin.depth,
                maxHeight: bin.height,
                maxWeight: bin.max_weight,
                maxVolume: bin.volume(),
                actualVolume: bin.actual_volume_util,
                actualVolumeUtil: bin.actual_volume_util_percentage(),
                actualWeight: bin.actual_weight_util,
                actualWeightUtil: bin.actual_weight_util_percentage(),
                fittedItems: if include_items {
                    bin.items.iter().map(|&h| item_response(registry, h, dimensions_after)).collect()
                } else {
                    Vec::new()
                },
            })
            .collect()
    } else {
        Vec::new()
    };

    Response {
        exception: None,
        requiredNrOfBins: Some(packer.number_of_bins()),
        totalVolumeUtil: Some(packer.total_volume_util_percentage()),
        totalWeightUtil: Some(packer.total_weight_util_percentage()),
        unfittedItems: unfitted_items,
        packedBins: packed_bins,
    }
}
