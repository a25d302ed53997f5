use clap::{crate_version, load_yaml, App, AppSettings, ArgMatches};
use hopsampler::{
    comms::{Comms, LocalCluster, LocalComms},
    data::{CsrGraph, EdgeList, EdgeProperties, Graph, PartitionMap},
    error::{Err, Result},
    sampler::{ResultTable, SampleOptions, Sampler},
    types::{Label, VId},
};
use itertools::Itertools;
use log::info;
use std::{str::FromStr, thread};

fn parse_list<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Vec<T>> {
    matches
        .values_of(name)
        .map_or(Ok(vec![]), |values| {
            values
                .filter(|v| !v.is_empty())
                .map(|v| {
                    v.trim()
                        .parse()
                        .map_err(|_| Err::Parse(format!("--{}: bad value {:?}", name, v)))
                })
                .collect()
        })
}

fn parse_value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    let value = matches.value_of(name).unwrap_or_default();
    value
        .parse()
        .map_err(|_| Err::Parse(format!("--{}: bad value {:?}", name, value)))
}

fn parse_options(matches: &ArgMatches) -> Result<SampleOptions> {
    Ok(SampleOptions::new(parse_list(matches, "fan-out")?)
        .with_replacement(matches.is_present("with-replacement"))
        .seed(parse_value(matches, "seed")?))
}

/// Runs `job` on every worker; rank 0 gets the starting vertices.
fn run_workers<T, F>(
    list: &EdgeList,
    workers: usize,
    starting: Vec<VId>,
    labels: Option<Vec<Label>>,
    job: F,
) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(&Sampler<CsrGraph, LocalComms>, &[VId], Option<&[Label]>) -> Result<T> + Sync,
{
    let graph = CsrGraph::from_edges(list.num_vertices, list.edges.iter().copied())?;
    info!("graph: {}", graph.info());
    let map = PartitionMap::even(list.num_vertices, workers)?;
    let locals = (0..workers)
        .map(|rank| graph.local(&map, rank))
        .collect::<Result<Vec<_>>>()?;
    let mut props = EdgeProperties::new();
    if let Some(weights) = &list.weights {
        props = props.with_weights(weights);
    }
    if let Some(types) = &list.types {
        props = props.with_types(types);
    }
    let cluster = LocalCluster::new(workers)?;
    let (job, map) = (&job, &map);
    thread::scope(|scope| {
        let handles: Vec<_> = cluster
            .workers()
            .into_iter()
            .zip(&locals)
            .map(|(comms, local)| {
                let (starting, labels) = if comms.rank() == 0 {
                    (starting.clone(), labels.clone())
                } else {
                    (vec![], labels.as_ref().map(|_| vec![]))
                };
                scope.spawn(move || {
                    let sampler = Sampler::distributed(local, comms, map).properties(props);
                    job(&sampler, &starting, labels.as_deref())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| Err::Collective(String::from("worker panicked")))?
            })
            .collect()
    })
}

fn handle_plain(matches: &ArgMatches) -> Result<()> {
    let list = EdgeList::read(matches.value_of("EDGES").unwrap_or_default())?;
    let options = parse_options(matches)?;
    let samples = run_workers(
        &list,
        parse_value(matches, "workers")?,
        parse_list(matches, "start")?,
        None,
        |sampler, starting, _| sampler.plain_sample(starting, &options),
    )?;
    println!("rank\tsrc\tdst\tweight\tedge_id");
    for (rank, sample) in samples.iter().enumerate() {
        for i in 0..sample.len() {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                rank, sample.src[i], sample.dst[i], sample.weight[i], sample.edge_id[i]
            );
        }
    }
    Ok(())
}

fn print_table(rank: usize, table: &ResultTable) {
    let optional = |column: Option<String>| column.unwrap_or_else(|| String::from("-"));
    for i in 0..table.len() {
        println!(
            "{}",
            [
                rank.to_string(),
                table.src()[i].to_string(),
                table.dst()[i].to_string(),
                table.edge_id()[i].to_string(),
                optional(table.edge_type().map(|c| c[i].to_string())),
                optional(table.weight().map(|c| c[i].to_string())),
                table.hop()[i].to_string(),
                optional(table.label().map(|c| c[i].to_string())),
            ]
            .iter()
            .join("\t")
        );
    }
}

fn handle_extended(matches: &ArgMatches) -> Result<()> {
    let list = EdgeList::read(matches.value_of("EDGES").unwrap_or_default())?;
    let options = parse_options(matches)?;
    let labels = if matches.is_present("labels") {
        Some(parse_list(matches, "labels")?)
    } else {
        None
    };
    let tables = run_workers(
        &list,
        parse_value(matches, "workers")?,
        parse_list(matches, "start")?,
        labels,
        |sampler, starting, labels| sampler.extended_sample(starting, labels, &options),
    )?;
    println!("rank\tsrc\tdst\tedge_id\tedge_type\tweight\thop\tlabel");
    for (rank, table) in tables.iter().enumerate() {
        print_table(rank, table);
    }
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("plain") {
        handle_plain(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("extended") {
        handle_extended(matches)?;
    }
    Ok(())
}
