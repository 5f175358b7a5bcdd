//! navmenu CLI tool
//!
//! Loads a TOML menu definition and a TOML route table, marks a request as current and prints
//! what a template would receive.
//!
//! ## Commands
//!
//! - `render`: Print a resolved view (tree, children, breadcrumb path or back target) as JSON
//! - `check`: Verify that every link of a menu can be evaluated by the route table

use clap::{Parser, Subcommand, ValueEnum};
use navmenu_core::{
    auth::{AllowAll, Authorizer, StaticAcl},
    config::MenuDefinition,
    link::{LinkArgs, ParamValue, RouteTable},
    menu::{MenuContext, MenuTree},
    MenuError,
};
use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(name = "navmenu")]
#[command(author, version, about = "A tool for resolving navigation menus against a request", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewKind {
    Tree,
    Children,
    Path,
    Upper,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved view of a menu for one request
    Render {
        /// Path to the TOML menu definition
        #[arg(long)]
        menu: PathBuf,

        /// Path to the TOML route table
        #[arg(long)]
        routes: PathBuf,

        /// Target of the request being served (e.g. "Article:show")
        #[arg(long)]
        current: Option<String>,

        /// Link parameter cascaded from the root, as key=value (value parsed as JSON when
        /// possible). May be repeated.
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Granted resource:privilege pair ("*" for any). Everything is allowed when omitted.
        #[arg(long = "allow")]
        allow: Vec<String>,

        /// Which view to print
        #[arg(long, value_enum, default_value_t = ViewKind::Tree)]
        view: ViewKind,

        /// Name of the item to start from (default: the root)
        #[arg(long)]
        item: Option<String>,
    },

    /// Check that a menu definition and route table fit together
    Check {
        /// Path to the TOML menu definition
        #[arg(long)]
        menu: PathBuf,

        /// Path to the TOML route table
        #[arg(long)]
        routes: PathBuf,
    },
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))
}

fn parse_value(raw: &str) -> ParamValue {
    serde_json::from_str(raw).unwrap_or_else(|_| ParamValue::String(raw.to_string()))
}

fn wildcard(part: &str) -> Option<&str> {
    if part == "*" {
        None
    } else {
        Some(part)
    }
}

fn build_acl(allow: &[String]) -> Result<StaticAcl, MenuError> {
    allow.iter().try_fold(StaticAcl::new(), |acl, rule| {
        let (resource, privilege) = rule.split_once(':').ok_or_else(|| {
            MenuError::Config(format!("expected resource:privilege, got '{rule}'"))
        })?;
        Ok(acl.allow(wildcard(resource), wildcard(privilege)))
    })
}

fn load(menu: &Path, routes: &Path) -> Result<(MenuTree, RouteTable), MenuError> {
    let tree = MenuDefinition::from_path(menu)?.build(None)?;
    let routes = RouteTable::from_toml_str(&read_to_string(routes)?)?;
    Ok((tree, routes))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            menu,
            routes,
            current,
            params,
            allow,
            view,
            item,
        } => {
            let (mut tree, mut routes) = load(&menu, &routes)?;
            if let Some(current) = current {
                routes.set_current(&current, LinkArgs::new());
            }
            tree.refresh_active_state(&routes)?;

            let root = tree.root();
            for (key, value) in params {
                tree.set_link_param(root, &key, parse_value(&value));
            }

            let acl;
            let authorizer: &dyn Authorizer = if allow.is_empty() {
                &AllowAll
            } else {
                acl = build_acl(&allow)?;
                &acl
            };
            let ctx = MenuContext::new(&routes, authorizer);

            let output = match view {
                ViewKind::Tree => serde_json::to_string_pretty(&tree.tree_view(
                    root,
                    item.as_deref(),
                    &ctx,
                )?)?,
                ViewKind::Children => serde_json::to_string_pretty(&tree.children_view(
                    root,
                    item.as_deref(),
                    &ctx,
                )?)?,
                ViewKind::Path => serde_json::to_string_pretty(&tree.path_view(root, &ctx)?)?,
                ViewKind::Upper => serde_json::to_string_pretty(&tree.upper_view(root, &ctx)?)?,
            };
            println!("{output}");
            Ok(())
        }

        Commands::Check { menu, routes } => {
            let (mut tree, routes) = load(&menu, &routes)?;
            tree.refresh_active_state(&routes)?;

            let root = tree.root();
            let mut unresolved = 0;
            for id in std::iter::once(root).chain(tree.descendants(root)) {
                let indent = "  ".repeat(tree.depth(id));
                match tree.url(id, &routes) {
                    Some(url) => println!("{indent}{} -> {url}", tree.name(id)),
                    None => {
                        unresolved += 1;
                        println!("{indent}{} -> (no url)", tree.name(id));
                    }
                }
            }
            println!(
                "\n✓ {} item(s), {} without a url (items waiting for a parameter included)",
                tree.len(),
                unresolved
            );
            Ok(())
        }
    }
}
