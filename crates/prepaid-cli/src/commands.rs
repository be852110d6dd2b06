use std::io;

use anyhow::Result;
use prepaid_cli::pipeline::{
    ConvertPlan, ConvertReport, InspectReport, convert, inspect, load_layout, prompt_names,
};
use prepaid_ingest::SourceEncoding;
use prepaid_model::{ConversionOptions, EmptyGroupPolicy, ItemLimitPolicy};

use crate::cli::{ConvertArgs, EmptyGroupArg, EncodingArg, InputArgs, ItemLimitArg};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertReport> {
    let source = &args.source;
    let mut plan = ConvertPlan::new(&source.input, conversion_options(source)?);
    plan.encoding = source_encoding(source.encoding);
    plan.names.clone_from(&args.names);
    if let Some(output) = &args.output {
        plan.output.clone_from(output);
    }
    if let Some(pending_out) = &args.pending_out {
        plan.pending_out.clone_from(pending_out);
    }

    if args.interactive {
        let stdin = io::stdin();
        convert(&plan, |pending| {
            prompt_names(pending, stdin.lock(), io::stderr())
        })
    } else {
        convert(&plan, |_| Ok(Vec::new()))
    }
}

pub fn run_inspect(args: &InputArgs) -> Result<InspectReport> {
    inspect(
        &args.input,
        source_encoding(args.encoding),
        conversion_options(args)?,
    )
}

fn conversion_options(args: &InputArgs) -> Result<ConversionOptions> {
    let mut options = ConversionOptions::new()
        .with_item_limit(match args.item_limit {
            ItemLimitArg::Reject => ItemLimitPolicy::Reject,
            ItemLimitArg::Truncate => ItemLimitPolicy::Truncate,
        })
        .with_empty_group(match args.empty_group {
            EmptyGroupArg::Reject => EmptyGroupPolicy::Reject,
            EmptyGroupArg::BaseOnly => EmptyGroupPolicy::BaseOnly,
        });
    if let Some(path) = &args.layout {
        options = options.with_layout(load_layout(path)?);
    }
    Ok(options)
}

fn source_encoding(arg: EncodingArg) -> SourceEncoding {
    match arg {
        EncodingArg::ShiftJis => SourceEncoding::ShiftJis,
        EncodingArg::Utf8 => SourceEncoding::Utf8,
    }
}
