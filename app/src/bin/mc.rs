use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use structopt::StructOpt;

use infra::ids::OrderId;
use mealcart::checkout::{Field, SubmitOutcome};
use mealcart::menu::MealId;
use mealcart::MealCart;

#[derive(Debug, StructOpt)]
#[structopt(name = "mc", about = "Mealcart storefront CLI")]
struct Opt {
    /// Config file
    #[structopt(parse(from_os_str))]
    config: PathBuf,
    #[structopt(subcommand)]
    command: Commands,
}

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(name = "show-menu", about = "Show the menu")]
    ShowMenu,
    #[structopt(name = "list-orders", about = "List saved orders")]
    ListOrders,
    #[structopt(name = "delete-order", about = "Delete a saved order by id")]
    DeleteOrder { id: OrderId },
    #[structopt(name = "place-order", about = "Select meals and check out")]
    PlaceOrder {
        /// Meal ids to order; repeat to add more
        #[structopt(short = "m", long = "meal", required = true)]
        meals: Vec<u32>,
        #[structopt(long = "name")]
        name: String,
        #[structopt(long = "email")]
        email: String,
        #[structopt(long = "phone")]
        phone: String,
        #[structopt(long = "address")]
        address: String,
        #[structopt(long = "payment")]
        payment: String,
    },
}

#[derive(Deserialize, Debug)]
struct Config {
    #[serde(flatten)]
    mealcart: mealcart::config::Config,
    #[serde(default)]
    env_logger: mealcart::config::EnvLogger,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let mut config_buf = String::new();
    File::open(&opt.config)?.read_to_string(&mut config_buf)?;
    let config: Config = toml::from_str(&config_buf)?;

    config.env_logger.builder().init();

    let cart = MealCart::new(&config.mealcart)?;

    match opt.command {
        Commands::ShowMenu => {
            for item in cart.catalog().items() {
                println!(
                    "{:>3}  {:<24} £{}  {}",
                    item.id, item.name, item.price, item.description
                );
            }
        }
        Commands::ListOrders => {
            let orders = cart.orders().list();
            if orders.is_empty() {
                println!("No saved orders");
            }
            for (n, order) in orders.iter().enumerate() {
                println!("Order #{} ({}) - {}", n + 1, order.id, order.date);
                for meal in order.meals.iter() {
                    println!("    {} (£{})", meal.name, meal.price);
                }
                println!("    Total: £{}", order.total);
            }
        }
        Commands::DeleteOrder { id } => {
            cart.orders().delete_by_id(id)?;
            println!("Deleted order {}", id);
        }
        Commands::PlaceOrder {
            meals,
            name,
            email,
            phone,
            address,
            payment,
        } => {
            let mut flow = cart.checkout();
            for id in meals {
                let item = cart
                    .catalog()
                    .find(MealId(id))
                    .ok_or_else(|| anyhow!("No meal with id {}", id))?;
                flow.toggle(item.clone());
            }

            flow.proceed()?;
            flow.begin_checkout()?;
            flow.set_field(Field::FullName, &name)?;
            flow.set_field(Field::Email, &email)?;
            flow.set_field(Field::Phone, &phone)?;
            flow.set_field(Field::Address, &address)?;
            flow.set_field(Field::PaymentMethod, &payment)?;

            match flow.submit()? {
                SubmitOutcome::Confirmed(order) => {
                    println!("Order {} confirmed; total £{}", order.id, order.total);
                }
                SubmitOutcome::Rejected(errors) => {
                    for (_, message) in errors.iter() {
                        eprintln!("{}", message);
                    }
                    bail!("Order was not placed");
                }
            }
        }
    }

    Ok(())
}
