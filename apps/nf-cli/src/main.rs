use clap::{Parser, Subcommand, ValueEnum};
use nf_eos::EquationOfState;
use nf_flash::Property;
use nf_props::{
    FluidInputPair, NitrogenProperties, PropsError, SweepDefinition, SweepType, SweptInput,
    compute_equilibrium_state, execute_sweep,
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Props(#[from] PropsError),
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "nf-cli")]
#[command(about = "Nitrogen state and property calculator", long_about = None)]
struct Cli {
    /// Equation of state
    #[arg(long, global = true, value_enum, default_value = "coolprop")]
    model: ModelArg,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full equilibrium state from an input pair (SI units)
    State {
        #[arg(value_enum)]
        pair: PairArg,
        first: f64,
        second: f64,
    },
    /// One property and its partial derivatives with respect to the input pair
    Property {
        #[arg(value_enum)]
        of: PropertyArg,
        #[arg(value_enum)]
        first_property: PropertyArg,
        first: f64,
        #[arg(value_enum)]
        second_property: PropertyArg,
        second: f64,
    },
    /// Sweep one input of a pair with the other held fixed
    Sweep {
        #[arg(value_enum)]
        pair: PairArg,
        /// Which input is swept
        #[arg(long, value_enum, default_value = "second")]
        swept: SweptArg,
        #[arg(long)]
        start: f64,
        #[arg(long)]
        end: f64,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Value of the input held fixed
        #[arg(long)]
        fixed: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    /// CoolProp reference equation of state
    Coolprop,
    /// Closed-form van der Waals
    Vdw,
    /// Calorically perfect ideal gas
    Ideal,
}

#[derive(Clone, Copy, ValueEnum)]
enum PairArg {
    Pt,
    Ph,
    Ps,
    Hs,
    RhoH,
}

impl From<PairArg> for FluidInputPair {
    fn from(arg: PairArg) -> Self {
        match arg {
            PairArg::Pt => Self::PT,
            PairArg::Ph => Self::PH,
            PairArg::Ps => Self::PS,
            PairArg::Hs => Self::HS,
            PairArg::RhoH => Self::RhoH,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PropertyArg {
    V,
    Rho,
    E,
    P,
    T,
    S,
    H,
}

impl From<PropertyArg> for Property {
    fn from(arg: PropertyArg) -> Self {
        match arg {
            PropertyArg::V => Self::Volume,
            PropertyArg::Rho => Self::Density,
            PropertyArg::E => Self::Energy,
            PropertyArg::P => Self::Pressure,
            PropertyArg::T => Self::Temperature,
            PropertyArg::S => Self::Entropy,
            PropertyArg::H => Self::Enthalpy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SweptArg {
    First,
    Second,
}

impl From<SweptArg> for SweptInput {
    fn from(arg: SweptArg) -> Self {
        match arg {
            SweptArg::First => Self::First,
            SweptArg::Second => Self::Second,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.model {
        ModelArg::Coolprop => run(&NitrogenProperties::nitrogen(), cli.command),
        ModelArg::Vdw => run(&NitrogenProperties::van_der_waals(), cli.command),
        ModelArg::Ideal => run(&NitrogenProperties::ideal_gas(), cli.command),
    }
}

fn run<E: EquationOfState>(props: &NitrogenProperties<E>, command: Commands) -> CliResult<()> {
    info!(model = props.eos().name(), "property model");

    match command {
        Commands::State {
            pair,
            first,
            second,
        } => print_json(&compute_equilibrium_state(props, pair.into(), first, second)?),
        Commands::Property {
            of,
            first_property,
            first,
            second_property,
            second,
        } => print_json(&props.property_with_derivatives(
            first_property.into(),
            first,
            second_property.into(),
            second,
            of.into(),
        )?),
        Commands::Sweep {
            pair,
            swept,
            start,
            end,
            points,
            log,
            fixed,
        } => {
            let sweep_type = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let sweep = SweepDefinition::new(start, end, points, sweep_type)?;
            print_json(&execute_sweep(props, pair.into(), swept.into(), &sweep, fixed))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
