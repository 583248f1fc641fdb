use grid_kmeans::*;
use rand::prelude::*;

fn main() {
    env_logger::init();
    let (height, width, k, max_iter) = (64, 64, 4, 2500);

    // Generate some random data: a horizontal gradient with noise
    let mut rnd = StdRng::seed_from_u64(1337);
    let rows: Vec<Vec<i32>> = (0..height)
        .map(|_| (0..width).map(|col| col as i32 * 4 + rnd.gen_range(-16..=16)).collect())
        .collect();

    let conf = ClusterConfig::<f64>::build()
        .init_done(&|s| println!("Initialization completed: {:?}", s.centroids))
        .iteration_done(&|s, nr, swaps|
            println!("Iteration {} - {} cells moved | Error: {:.2}", nr, swaps, s.distsum))
        .empty_cluster_strategy(EmptyClusterStrategy::Zero)
        .random_generator(rnd)
        .build();

    let mut engine = ClusterEngine::new(rows, k, height, width).unwrap();
    let centroids = engine.kmeans_lloyd(max_iter, ClusterEngine::init_random_range, &conf).unwrap();

    println!("Centroids: {:?}", centroids);
    println!("Converged: {} after {} iterations", engine.converged(), engine.iterations());
}
