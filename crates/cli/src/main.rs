use api_shared::MatchRes;
use clap::{Parser, Subcommand};
use devdishes_core::{
    constants::{ALL_CATEGORIES, DEFAULT_API_URL, DEFAULT_CATEGORY},
    submission_message, CoreConfig, Difficulty, Recipe, RecipeGateway, RecipeId, RecipeService,
    RecipeSubmission, SelectionSet,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "devdishes")]
#[command(about = "Browse, match and submit DevDishes recipes")]
struct Cli {
    /// Base URL of the recipe service
    #[arg(long, global = true, env = "DEVDISHES_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// YAML file replacing the built-in seed recipes
    #[arg(long, global = true, env = "DEVDISHES_SEED_FILE")]
    seed_file: Option<PathBuf>,
    /// Timeout in seconds for calls to the recipe service
    #[arg(long, global = true, env = "DEVDISHES_REQUEST_TIMEOUT_SECS")]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes, optionally filtered
    Browse {
        /// Text matched against name, tags and description
        #[arg(long, short)]
        search: Option<String>,
        /// Category to show
        #[arg(long, short, default_value = ALL_CATEGORIES)]
        category: String,
    },
    /// List the categories in the catalog
    Categories,
    /// Find recipes you can make with the ingredients you have
    Match {
        /// Ingredients you have
        #[arg(required = true)]
        ingredients: Vec<String>,
    },
    /// Suggest popular ingredients not yet chosen
    Suggest {
        /// Ingredients already chosen
        selected: Vec<String>,
    },
    /// Show a recipe from the recipe service
    Show {
        /// Recipe id
        id: String,
    },
    /// Submit a recipe for review
    Submit {
        /// Recipe name
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        /// Easy, Medium or Hard
        #[arg(long, default_value = "Easy")]
        difficulty: Difficulty,
        /// For example "30 min"
        #[arg(long, default_value = "")]
        prep_time: String,
        #[arg(long, default_value_t = 1)]
        servings: u32,
        /// Image URL
        #[arg(long, default_value = "")]
        image: String,
        /// Ingredient line (repeatable)
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,
        /// Instruction step (repeatable)
        #[arg(long = "instruction", required = true)]
        instructions: Vec<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

fn print_recipe_line(recipe: &Recipe) {
    println!(
        "[{}] {} ({}, {}) - {} - {} servings",
        recipe.id,
        recipe.name,
        recipe.category,
        recipe.difficulty,
        if recipe.prep_time.is_empty() {
            "?"
        } else {
            recipe.prep_time.as_str()
        },
        recipe.servings
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::new(
        &cli.api_url,
        cli.seed_file,
        cli.timeout.map(Duration::from_secs),
    )?;

    match cli.command {
        Some(Commands::Browse { search, category }) => {
            let service = RecipeService::start(&cfg).await?;
            let recipes = service
                .catalog()
                .browse(search.as_deref().unwrap_or_default(), &category);
            if recipes.is_empty() {
                println!("No recipes found.");
            } else {
                for recipe in recipes {
                    print_recipe_line(recipe);
                }
            }
        }
        Some(Commands::Categories) => {
            let service = RecipeService::start(&cfg).await?;
            for category in service.catalog().categories() {
                println!("{category}");
            }
        }
        Some(Commands::Match { ingredients }) => {
            let service = RecipeService::start(&cfg).await?;
            let selection = SelectionSet::from_terms(&ingredients);
            let res = MatchRes::build(service.catalog(), &selection);
            println!("Your ingredients: {}", res.selected.join(", "));
            if res.matches.is_empty() {
                println!("No recipes found. Try adding different ingredients or removing some.");
            } else {
                println!("Recipes you can make ({} found):", res.matches.len());
                for matched in res.matches {
                    println!(
                        "{:>3}% match  [{}] {} ({})",
                        matched.match_percentage,
                        matched.recipe.id,
                        matched.recipe.name,
                        matched.recipe.category
                    );
                    println!("       matching: {}", matched.matching_ingredients.join(", "));
                }
            }
        }
        Some(Commands::Suggest { selected }) => {
            let selection = SelectionSet::from_terms(&selected);
            println!("{}", selection.suggestions().join(", "));
        }
        Some(Commands::Show { id }) => {
            let id: RecipeId = id.parse()?;
            let gateway = RecipeGateway::new(&cfg)?;
            match gateway.get_recipe(&id).await {
                Ok(detail) => {
                    println!("{}", detail.name);
                    if let Some(image) = detail.image.filter(|i| !i.is_empty()) {
                        println!("{image}");
                    }
                    println!();
                    println!("{}", detail.content);
                }
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
        Some(Commands::Submit {
            name,
            description,
            category,
            difficulty,
            prep_time,
            servings,
            image,
            ingredients,
            instructions,
            tags,
        }) => {
            let submission = RecipeSubmission {
                name,
                description,
                category,
                difficulty,
                prep_time,
                servings,
                image,
                ingredients,
                instructions,
                tags,
            };
            let result = match submission.into_payload() {
                Ok(payload) => RecipeGateway::new(&cfg)?.create_recipe(&payload).await,
                Err(e) => Err(e),
            };
            match &result {
                Ok(_) => println!("{}", submission_message(&result)),
                Err(_) => eprintln!("{}", submission_message(&result)),
            }
        }
        None => {
            println!("Use 'devdishes --help' for commands");
        }
    }

    Ok(())
}
