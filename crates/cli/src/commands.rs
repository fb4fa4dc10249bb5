//! Command-line surface over the simulator and the catalog editor.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};

use purific_catalog::{
    CatalogEditor, CatalogItem, CatalogStore, CollectionKind, KeyValueStorage, PersistenceMode,
    RefillCount,
};
use purific_core::ItemId;
use purific_infra::{FileStorage, InMemoryStorage, default_data_dir};
use purific_simulator::session::{DEFAULT_JUG_PRICE, DEFAULT_JUGS_PER_WEEK};
use purific_simulator::{Balance, ContactLink, SimulatorSession, format_brl, format_price_label};

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "purific", version, about = "Purifier savings simulator and catalog editor")]
pub struct Cli {
    /// Do not read or write the on-disk catalog.
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare bottled-water jugs with a purifier over 1 and 5 years.
    Simulate(SimulateArgs),
    /// Inspect and edit purifiers and refills.
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[arg(long, default_value_t = DEFAULT_JUGS_PER_WEEK, allow_negative_numbers = true)]
    pub jugs_per_week: f64,
    /// Price of one jug in BRL.
    #[arg(long, default_value_t = DEFAULT_JUG_PRICE, allow_negative_numbers = true)]
    pub jug_price: f64,
    /// Purifier id (defaults to the first one).
    #[arg(long)]
    pub purifier: Option<ItemId>,
    /// Refill id (defaults to the first one).
    #[arg(long)]
    pub refill: Option<ItemId>,
    /// Also print the order link with the simulation attached.
    #[arg(long)]
    pub contact: bool,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List one collection, or both.
    List { kind: Option<CollectionKind> },
    AddPurifier {
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        /// Refills consumed per change (1 or 2).
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
        refill_count: u8,
    },
    AddRefill {
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
    },
    /// Change fields of an existing item; omitted fields keep their value.
    Edit {
        kind: CollectionKind,
        id: ItemId,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        price: Option<f64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        refill_count: Option<u8>,
    },
    Delete { kind: CollectionKind, id: ItemId },
}

/// Execute one command, writing user-facing output to `out`.
pub fn run<W: Write>(cli: Cli, config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let storage = open_storage(config, cli.in_memory)?;
    let mut store = CatalogStore::open(storage);

    match cli.command {
        Command::Simulate(args) => simulate(&store, &args, config, out),
        Command::Catalog(cmd) => {
            let result = catalog(&mut store, cmd, out);
            if store.persistence_mode() == PersistenceMode::MemoryOnly {
                writeln!(
                    out,
                    "Aviso: alterações mantidas apenas nesta sessão (armazenamento indisponível)."
                )?;
            }
            result
        }
    }
}

fn open_storage(config: &AppConfig, in_memory: bool) -> anyhow::Result<Arc<dyn KeyValueStorage>> {
    if in_memory || config.in_memory {
        tracing::debug!("using in-memory catalog storage");
        return Ok(Arc::new(InMemoryStorage::new()));
    }

    let dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let storage = FileStorage::open(&dir).context("failed to open catalog storage")?;
    Ok(Arc::new(storage))
}

fn simulate<S, W>(
    store: &CatalogStore<S>,
    args: &SimulateArgs,
    config: &AppConfig,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: KeyValueStorage,
    W: Write,
{
    let catalog = store.catalog();
    let mut session = SimulatorSession::new(catalog);
    session.set_jugs_per_week(args.jugs_per_week);
    session.set_jug_price(args.jug_price);
    if let Some(id) = &args.purifier {
        session.select_purifier(id.clone());
    }
    if let Some(id) = &args.refill {
        session.select_refill(id.clone());
    }

    let (Some(projection), Some(purifier), Some(refill)) = (
        session.projection(catalog),
        session.selected_purifier(catalog),
        session.selected_refill(catalog),
    ) else {
        writeln!(out, "Sem resultado: selecione um purificador e um refil cadastrados.")?;
        return Ok(());
    };

    writeln!(
        out,
        "Purificador: {} ({})",
        purifier.description,
        format_price_label(purifier.price)
    )?;
    writeln!(out, "Refil: {} ({})", refill.description, format_price_label(refill.price))?;
    writeln!(out, "* Os refis são trocados a cada 6 meses.")?;
    writeln!(out)?;

    writeln!(out, "Resultado em 1 ano")?;
    writeln!(out, "  Gasto com galão:   {}", format_brl(projection.jug_cost_1y))?;
    writeln!(out, "  Gasto com Purific: {}", format_brl(projection.purifier_cost_1y))?;
    writeln!(out, "  {}", balance_line(projection.balance_1y()))?;
    writeln!(out)?;

    writeln!(out, "Previsão em 5 anos")?;
    writeln!(out, "  Gasto com galão:   {}", format_brl(projection.jug_cost_5y))?;
    writeln!(out, "  Gasto com Purific: {}", format_brl(projection.purifier_cost_5y))?;
    writeln!(out, "  {}", balance_line(projection.balance_5y()))?;

    if args.contact {
        let link =
            ContactLink::for_projection(config.contact_number.as_str(), &projection, purifier);
        writeln!(out)?;
        writeln!(out, "Pedir meu Purificador agora: {link}")?;
    }
    Ok(())
}

fn balance_line(balance: Balance) -> String {
    match balance {
        Balance::Savings(v) => format!("Economia total:    {}", format_brl(v)),
        Balance::Loss(v) => format!("Custo adicional:   {}", format_brl(v)),
        Balance::BreakEven => format!("Sem diferença:     {}", format_brl(0.0)),
    }
}

fn catalog<S, W>(
    store: &mut CatalogStore<S>,
    cmd: CatalogCommand,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: KeyValueStorage,
    W: Write,
{
    let mut editor = CatalogEditor::new();

    match cmd {
        CatalogCommand::List { kind } => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => vec![CollectionKind::Purifiers, CollectionKind::Refills],
            };
            for kind in kinds {
                list(store, kind, out)?;
            }
        }
        CatalogCommand::AddPurifier {
            description,
            price,
            refill_count,
        } => {
            editor.switch_collection(CollectionKind::Purifiers);
            let form = editor.form_mut();
            form.description = description;
            form.price = price;
            form.refill_count = RefillCount::try_from(refill_count)?;
            let id = editor.submit(store)?;
            writeln!(out, "Purificador adicionado: {id}")?;
        }
        CatalogCommand::AddRefill { description, price } => {
            editor.switch_collection(CollectionKind::Refills);
            let form = editor.form_mut();
            form.description = description;
            form.price = price;
            let id = editor.submit(store)?;
            writeln!(out, "Refil adicionado: {id}")?;
        }
        CatalogCommand::Edit {
            kind,
            id,
            description,
            price,
            refill_count,
        } => {
            let Some(item) = store.item(kind, &id) else {
                bail!("no {kind} item with id {id}");
            };
            if refill_count.is_some() && matches!(item, CatalogItem::Refill(_)) {
                bail!("refills have no refill count");
            }

            editor.select_for_edit(&item);
            let form = editor.form_mut();
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(count) = refill_count {
                form.refill_count = RefillCount::try_from(count)?;
            }
            let id = editor.submit(store)?;
            writeln!(out, "Item atualizado: {id}")?;
        }
        CatalogCommand::Delete { kind, id } => {
            if editor.delete_item(store, kind, &id) {
                writeln!(out, "Item removido: {id}")?;
            } else {
                writeln!(out, "Nenhum item {id} em {kind}.")?;
            }
        }
    }
    Ok(())
}

fn list<S, W>(store: &CatalogStore<S>, kind: CollectionKind, out: &mut W) -> anyhow::Result<()>
where
    S: KeyValueStorage,
    W: Write,
{
    match kind {
        CollectionKind::Purifiers => {
            writeln!(out, "Purificadores")?;
            for p in store.purifiers() {
                writeln!(
                    out,
                    "  {}\t{}\t{} ({} refis)",
                    p.id,
                    p.description,
                    format_price_label(p.price),
                    p.refill_count
                )?;
            }
        }
        CollectionKind::Refills => {
            writeln!(out, "Refis")?;
            for r in store.refills() {
                writeln!(out, "  {}\t{}\t{}", r.id, r.description, format_price_label(r.price))?;
            }
        }
    }
    Ok(())
}
