use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use toml_edit::{Array, DocumentMut, value};

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, i64, bool);

impl ConfigSerializeDefault for Vec<String> {
    fn fix_config(self, name: &str, doc: &mut DocumentMut) {
        doc.entry(name)
            .or_insert_with(|| value(self.into_iter().collect::<Array>()));
    }
}

macro_rules! gen_config {
    (
        $( $name:ident: $type:ty = $default:expr),*
    ) => {
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
        pub struct WarpsConfig {
            $(
                pub $name: $type,
            )*
        }

        impl Default for WarpsConfig {
            fn default() -> Self {
                WarpsConfig {
                    $(
                        $name: $default,
                    )*
                }
            }
        }

        impl WarpsConfig {
            /// Reads `config_file`, adding any missing keys with their defaults
            /// and writing the patched document back if anything was added.
            pub fn load(config_file: impl AsRef<Path>) -> Result<WarpsConfig> {
                let config_file = config_file.as_ref();
                let str = if config_file.exists() {
                    fs::read_to_string(config_file)
                        .with_context(|| format!("failed to read {}", config_file.display()))?
                } else {
                    String::new()
                };
                let mut doc = str
                    .parse::<DocumentMut>()
                    .with_context(|| format!("{} is not valid toml", config_file.display()))?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    fs::write(config_file, &patched)
                        .with_context(|| format!("failed to write {}", config_file.display()))?;
                }

                toml::from_str(&patched)
                    .with_context(|| format!("{} has invalid values", config_file.display()))
            }
        }
    };
}

gen_config! {
    warps_file: String = "config/betterwarps.json".to_string(),
    flush_on_mutation: bool = true,
    op_permission_level: i64 = 1,
    message_prefix: String = "[Simply Better Warps]".to_string(),
    dimensions: Vec<String> = vec![
        "minecraft:overworld".to_string(),
        "minecraft:the_nether".to_string(),
        "minecraft:the_end".to_string()
    ]
}

impl WarpsConfig {
    /// The op level clamped into the range the host understands.
    pub fn op_level(&self) -> u8 {
        self.op_permission_level.clamp(0, 4) as u8
    }
}
