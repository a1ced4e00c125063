use crate::{
    cli::{Commands, ConvertArgs, DigestAlgorithm},
    convert::change_type_with,
    culture::Culture,
    error::Result,
    ext::StrExt,
    ioutils::read_input,
    value::Value,
    xml::{json_to_xml, xml_to_json},
};
use log::{debug, info};

/// Executes one command and returns what should be printed.
pub fn run(command: &Commands) -> Result<String> {
    match command {
        Commands::Capitalize { text } => Ok(text.capitalize()),
        Commands::Filter { text } => Ok(text.remove_special_characters()),
        Commands::Split { text, separator } => Ok(text.split_non_empty(separator).join("\n")),
        Commands::Digest { text, algorithm } => {
            info!("Computing {algorithm} digest");
            match algorithm {
                DigestAlgorithm::Md5 => text.to_md5(),
                DigestAlgorithm::Sha256 => Ok(text.to_sha256()),
            }
        }
        Commands::Convert(args) => convert(args),
        Commands::XmlToJson { input } => xml_to_json(&read_input(input)?),
        Commands::JsonToXml { input } => json_to_xml(&read_input(input)?),
    }
}

fn convert(args: &ConvertArgs) -> Result<String> {
    let culture = args.culture.clone().unwrap_or_else(Culture::current);
    info!("Converting '{}' to {} ({})", args.value, args.to, culture.name);

    match change_type_with(&Value::from(args.value.as_str()), &args.to, &culture) {
        Ok(value) => Ok(value.to_string()),
        Err(err) => match &args.default {
            Some(fallback) => {
                debug!("Conversion failed ({err}); printing the default");
                Ok(fallback.clone())
            }
            None => Err(err),
        },
    }
}
