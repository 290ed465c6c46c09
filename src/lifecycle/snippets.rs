//! Eidos script fragments consumed by the life-cycle composers.
//!
//! Fragments reference the named constants each composer defines in the
//! initialize block (`spo_pop_size`, `gam_clone_rate`, ...). Fragments with
//! `{placeholder}` slots are rendered through the template module; the rest
//! are inserted verbatim.
//!
//! Population tags: `tag 0` marks a sexually produced individual, `tag 1` a
//! clone. `tagL0` carries sex where a mode needs one (T = female or
//! hermaphrodite, F = male).

/// Shared early alternator. `{activate}`/`{deactivate}` receive the
/// per-mutation callback toggles; literal braces are doubled for the
/// template renderer.
pub const EARLY_ALTERNATOR: &str = "\
if (community.tick % 2 == 0) {{
        // gametophytes were just generated; select on the haploid pool
        {activate}
        sim.chromosome.setMutationRate(gam_mutation_rate);
        p0.fitnessScaling = gam_pop_size / p0.individualCount;
    }}
    else {{
        // sporophytes were just generated; select on the diploid pool
        {deactivate}
        sim.chromosome.setMutationRate(spo_mutation_rate);
        p1.fitnessScaling = spo_pop_size / p1.individualCount;
    }}";

/// One substitution check, rendered per stage-restricted mutation type.
pub const SUB_MUT: &str = "\
mut{var} = sim.mutationsOfType({mut});
        freq{var} = sim.mutationFrequencies(NULL, mut{var});
        if (any(freq{var} == 1.0))
            sim.subpopulations.genomes.removeMutations(mut{var}[freq{var} == 1.0], T);";

/// Late substitution sweep wrapping the per-mutation checks.
pub const SUBSTITUTION: &str = "\
if (community.tick % 2 == 0) {{
        {checks}
    }}";

/// Parents never persist past the generation they reproduced in.
pub const SURV_PHASE: &str = "\
if (individual.age > 0)
        return F;
    return NULL;";

/// Sporophyte viability: random death, then the gametophytic maternal
/// contribution as a weighted average with the individual's own fitness.
pub const SURV_SPO: &str = "\
if (spo_random_death_chance > 0 & runif(1) < spo_random_death_chance)
        return F;
    maternal_fitness = individual.getValue(\"maternal_fitness\");
    if (!isNULL(maternal_fitness) & gam_maternal_effect > 0) {
        adjusted = (gam_maternal_effect * maternal_fitness) + (1 - gam_maternal_effect) * fitness;
        return (runif(1) < adjusted);
    }
    return NULL;";

/// Gametophyte viability, with the sporophytic maternal contribution.
pub const SURV_GAM: &str = "\
if (gam_random_death_chance > 0 & runif(1) < gam_random_death_chance)
        return F;
    maternal_fitness = individual.getValue(\"maternal_fitness\");
    if (!isNULL(maternal_fitness) & spo_maternal_effect > 0) {
        adjusted = (spo_maternal_effect * maternal_fitness) + (1 - spo_maternal_effect) * fitness;
        return (runif(1) < adjusted);
    }
    return NULL;";

// ---------------------------------------------------------------------------
// Wright-Fisher baseline (1-tick cycle, single diploid pool)

pub const WF_EARLY: &str = "p1.fitnessScaling = K / p1.individualCount;";

pub const REPRO_WF: &str = "\
// K offspring replace the parental pool each tick
    parents1 = sample(p1.individuals, K, replace=T);
    parents2 = sample(p1.individuals, K, replace=T);
    for (i in seqLen(K))
        p1.addCrossed(parents1[i], parents2[i]);
    self.active = 0;";

pub const REPRO_WF_SOFT: &str = "\
// parents are drawn proportional to fitness
    fitness = p1.cachedFitness(NULL);
    parents1 = sample(p1.individuals, K, replace=T, weights=fitness);
    parents2 = sample(p1.individuals, K, replace=T, weights=fitness);
    for (i in seqLen(K))
        p1.addCrossed(parents1[i], parents2[i]);
    self.active = 0;";

pub const REPRO_HAPLOID_WF: &str = "\
// two haploid genomes recombine into a haploid child
    parents1 = sample(p1.individuals, K, replace=T);
    parents2 = sample(p1.individuals, K, replace=T);
    for (i in seqLen(K)) {
        breaks = sim.chromosome.drawBreakpoints(parents1[i]);
        p1.addRecombinant(parents1.genome1[i], parents2.genome1[i], breaks, NULL, NULL, NULL);
    }
    self.active = 0;";

pub const REPRO_HAPLOID_SOFT_WF: &str = "\
// haploid parents are drawn proportional to fitness
    fitness = p1.cachedFitness(NULL);
    parents1 = sample(p1.individuals, K, replace=T, weights=fitness);
    parents2 = sample(p1.individuals, K, replace=T, weights=fitness);
    for (i in seqLen(K)) {
        breaks = sim.chromosome.drawBreakpoints(parents1[i]);
        p1.addRecombinant(parents1.genome1[i], parents2.genome1[i], breaks, NULL, NULL, NULL);
    }
    self.active = 0;";

pub const REPRO_CLONAL_WF: &str = "\
// each offspring copies a single sampled parent genome
    parents = sample(p1.individuals, K, replace=T);
    for (i in seqLen(K))
        p1.addRecombinant(parents.genome1[i], NULL, NULL, NULL, NULL, NULL);
    self.active = 0;";

pub const REPRO_CLONAL_SOFT_WF: &str = "\
// clonal parents are drawn proportional to fitness
    fitness = p1.cachedFitness(NULL);
    parents = sample(p1.individuals, K, replace=T, weights=fitness);
    for (i in seqLen(K))
        p1.addRecombinant(parents.genome1[i], NULL, NULL, NULL, NULL, NULL);
    self.active = 0;";

pub const REPRO_WF_SEXES: &str = "\
// runs per female; males only donate gametes
    if (individual.sex == \"F\") {
        mate = subpop.sampleIndividuals(1, sex=\"M\");
        if (mate.size())
            subpop.addCrossed(individual, mate);
    }";

// ---------------------------------------------------------------------------
// Bryophyte (gametophyte-dominant)

pub const REPRO_BRYO_MONO_P1: &str = "\
// each sporophyte sheds recombinant spores into the gametophyte pool
    breaks1 = sim.chromosome.drawBreakpoints(individual);
    breaks2 = sim.chromosome.drawBreakpoints(individual);
    for (rep in 1:spo_spores_per) {
        if (rep % 2 == 0)
            child = p0.addRecombinant(individual.genome1, individual.genome2, breaks1, NULL, NULL, NULL, parent1=individual);
        else
            child = p0.addRecombinant(individual.genome2, individual.genome1, breaks2, NULL, NULL, NULL, parent1=individual);
        child.tag = 0;
    }";

pub const REPRO_BRYO_MONO_P0: &str = "\
// clonal thalli rejoin the pool; they do not reproduce this round
    if (gam_clone_rate > 0 & runif(1) < gam_clone_rate) {
        for (i in 1:gam_clone_number) {
            clone = p0.addRecombinant(individual.genome1, NULL, NULL, NULL, NULL, NULL, parent1=individual);
            clone.tag = 1;
        }
    }

    // each egg is gametophytically selfed or outcrossed
    for (rep in 1:gam_sporophytes_per) {
        if (runif(1) < gam_self_rate) {
            sperm = individual.genome1;
        }
        else {
            mate = p0.sampleIndividuals(1, exclude=individual);
            if (!mate.size())
                next;
            sperm = mate.genome1;
        }
        child = p1.addRecombinant(individual.genome1, NULL, NULL, sperm, NULL, NULL, parent1=individual);
        child.tag = 0;
        if (gam_maternal_effect > 0)
            child.setValue(\"maternal_fitness\", subpop.cachedFitness(individual.index));
    }";

pub const REPRO_BRYO_DIO_P1: &str = "\
// spores carry a sex drawn from the configured ratio
    breaks1 = sim.chromosome.drawBreakpoints(individual);
    breaks2 = sim.chromosome.drawBreakpoints(individual);
    for (rep in 1:spo_spores_per) {
        if (rep % 2 == 0)
            child = p0.addRecombinant(individual.genome1, individual.genome2, breaks1, NULL, NULL, NULL, parent1=individual);
        else
            child = p0.addRecombinant(individual.genome2, individual.genome1, breaks2, NULL, NULL, NULL, parent1=individual);
        child.tag = 0;
        child.tagL0 = (runif(1) < gam_female_to_male_ratio);
    }";

pub const REPRO_BRYO_DIO_P0: &str = "\
// clonal thalli inherit the parent sex
    if (gam_clone_rate > 0 & runif(1) < gam_clone_rate) {
        for (i in 1:gam_clone_number) {
            clone = p0.addRecombinant(individual.genome1, NULL, NULL, NULL, NULL, NULL, parent1=individual);
            clone.tag = 1;
            clone.tagL0 = individual.tagL0;
        }
    }

    // females carry the archegonia; males only donate sperm
    if (individual.tagL0) {
        males = p0.individuals[!p0.individuals.tagL0];
        if (males.size()) {
            for (rep in 1:gam_sporophytes_per) {
                mate = sample(males, 1);
                child = p1.addRecombinant(individual.genome1, NULL, NULL, mate.genome1, NULL, NULL, parent1=individual);
                child.tag = 0;
                if (gam_maternal_effect > 0)
                    child.setValue(\"maternal_fitness\", subpop.cachedFitness(individual.index));
            }
        }
    }";

// ---------------------------------------------------------------------------
// Pteridophyte (sporophyte-dominant, free-living gametophytes)

pub const REPRO_PTER_HOMO_P1: &str = "\
// sporophyte clones stay diploid
    if (spo_clone_rate > 0 & runif(1) < spo_clone_rate) {
        for (i in 1:spo_clone_number) {
            clone = p1.addRecombinant(individual.genome1, NULL, NULL, individual.genome2, NULL, NULL, parent1=individual);
            clone.tag = 1;
        }
    }

    // meiosis: spores carry one recombinant genome each
    breaks = sim.chromosome.drawBreakpoints(individual);
    for (rep in 1:spo_spores_per) {
        child = p0.addRecombinant(individual.genome1, individual.genome2, breaks, NULL, NULL, NULL, parent1=individual);
        child.tag = 0;
        child.tagL0 = (runif(1) < gam_female_to_male_ratio);
    }";

pub const REPRO_PTER_HOMO_P0: &str = "\
// gametophyte clones
    if (gam_clone_rate > 0 & runif(1) < gam_clone_rate) {
        for (i in 1:gam_clone_number) {
            clone = p0.addRecombinant(individual.genome1, NULL, NULL, NULL, NULL, NULL, parent1=individual);
            clone.tag = 1;
            clone.tagL0 = individual.tagL0;
        }
    }

    // each egg of a hermaphrodite is gametophytically selfed, sib-mated,
    // or outcrossed, weighted by the configured rates
    if (individual.tagL0) {
        pool = p0.individuals;
        for (rep in 1:gam_archegonia_per) {
            draw = sample(c(1, 2, 3), 1, weights=c(gam_self_rate, spo_self_rate, 1 - (gam_self_rate + spo_self_rate)));
            if (draw == 1) {
                sperm = individual.genome1;
            }
            else if (draw == 2) {
                sibs = pool[individual.sharedParentCount(pool) != 0];
                if (!sibs.size())
                    next;
                sperm = sample(sibs, 1).genome1;
            }
            else {
                mate = p0.sampleIndividuals(1, exclude=individual);
                if (!mate.size())
                    next;
                sperm = mate.genome1;
            }
            child = p1.addRecombinant(individual.genome1, NULL, NULL, sperm, NULL, NULL, parent1=individual);
            child.tag = 0;
            if (gam_maternal_effect > 0)
                child.setValue(\"maternal_fitness\", subpop.cachedFitness(individual.index));
        }
    }";

pub const REPRO_PTER_HETERO_P1: &str = "\
// sporophyte clones stay diploid
    if (spo_clone_rate > 0 & runif(1) < spo_clone_rate) {
        for (i in 1:spo_clone_number) {
            clone = p1.addRecombinant(individual.genome1, NULL, NULL, individual.genome2, NULL, NULL, parent1=individual);
            clone.tag = 1;
        }
    }

    // heterospory: female megaspores and male microspores
    breaks = sim.chromosome.drawBreakpoints(individual);
    for (rep in 1:spo_megaspores_per) {
        child = p0.addRecombinant(individual.genome1, individual.genome2, breaks, NULL, NULL, NULL, parent1=individual);
        child.tag = 0;
        child.tagL0 = T;
    }
    for (rep in 1:spo_microspores_per) {
        child = p0.addRecombinant(individual.genome2, individual.genome1, breaks, NULL, NULL, NULL, parent1=individual);
        child.tag = 0;
        child.tagL0 = F;
    }";

pub const REPRO_PTER_HETERO_P0: &str = "\
// unisexual gametophytes: females outcross with sampled males
    if (individual.tagL0) {
        males = p0.individuals[!p0.individuals.tagL0];
        if (males.size()) {
            for (rep in 1:gam_archegonia_per) {
                mate = sample(males, 1);
                child = p1.addRecombinant(individual.genome1, NULL, NULL, mate.genome1, NULL, NULL, parent1=individual);
                child.tag = 0;
                if (gam_maternal_effect > 0)
                    child.setValue(\"maternal_fitness\", subpop.cachedFitness(individual.index));
            }
        }
    }";

// ---------------------------------------------------------------------------
// Spermatophyte (seed plants: gametophytes reduced to ovules and pollen)

pub const REPRO_SPERM_MONO_P1: &str = "\
// sporophyte clones stay diploid
    if (spo_clone_rate > 0 & runif(1) < spo_clone_rate) {
        for (i in 1:spo_clone_number) {
            clone = p1.addRecombinant(individual.genome1, NULL, NULL, individual.genome2, NULL, NULL, parent1=individual);
            clone.tag = 1;
        }
    }

    // hermaphroditic flowers carry both ovules and pollen
    meg_breaks = sim.chromosome.drawBreakpoints(individual);
    for (rep in 1:flower_ovules_per) {
        if (runif(1) < ovule_fertilization_rate) {
            ovule = p0.addRecombinant(individual.genome1, individual.genome2, meg_breaks, NULL, NULL, NULL, parent1=individual);
            ovule.tag = 0;
            ovule.tagL0 = T;
            if (spo_maternal_effect > 0)
                ovule.setValue(\"maternal_fitness\", subpop.cachedFitness(individual.index));
        }
    }
    mic_breaks = sim.chromosome.drawBreakpoints(individual);
    for (rep in 1:flower_pollen_per) {
        pollen = p0.addRecombinant(individual.genome2, individual.genome1, mic_breaks, NULL, NULL, NULL, parent1=individual);
        pollen.tag = 0;
        pollen.tagL0 = F;
    }";

pub const REPRO_SPERM_DIO_P1: &str = "\
// sporophyte clones inherit the parent sex
    if (spo_clone_rate > 0 & runif(1) < spo_clone_rate) {
        for (i in 1:spo_clone_number) {
            clone = p1.addRecombinant(individual.genome1, NULL, NULL, individual.genome2, NULL, NULL, parent1=individual);
            clone.tag = 1;
            clone.tagL0 = individual.tagL0;
        }
    }

    if (individual.tagL0) {
        // female sporophyte: ovules only
        meg_breaks = sim.chromosome.drawBreakpoints(individual);
        for (rep in 1:flower_ovules_per) {
            if (runif(1) < ovule_fertilization_rate) {
                ovule = p0.addRecombinant(individual.genome1, individual.genome2, meg_breaks, NULL, NULL, NULL, parent1=individual);
                ovule.tag = 0;
                ovule.tagL0 = T;
                if (spo_maternal_effect > 0)
                    ovule.setValue(\"maternal_fitness\", subpop.cachedFitness(individual.index));
            }
        }
    }
    else {
        // male sporophyte: pollen only
        mic_breaks = sim.chromosome.drawBreakpoints(individual);
        for (rep in 1:flower_pollen_per) {
            pollen = p0.addRecombinant(individual.genome2, individual.genome1, mic_breaks, NULL, NULL, NULL, parent1=individual);
            pollen.tag = 0;
            pollen.tagL0 = F;
        }
    }";

pub const REPRO_SPERM_MONO_P0: &str = "\
// each ovule is fertilized by selfed or sampled pollen; competition
    // weights the draw by pollen fitness when enabled
    if (individual.tagL0) {
        pool = p0.individuals[!p0.individuals.tagL0];
        if (!pool.size())
            return;
        if (spo_self_rate > 0 & runif(1) < spo_self_rate) {
            sibs = pool[individual.sharedParentCount(pool) != 0];
            winner = sibs.size() ? sample(sibs, 1) else sample(pool, 1);
        }
        else if (pollen_comp) {
            candidates = sample(pool, min(stigma_pollen_per, pool.size()));
            winner = sample(candidates, 1, weights=p0.cachedFitness(candidates.index));
        }
        else {
            winner = sample(pool, 1);
        }
        if (runif(1) < pollen_success_rate) {
            child = p1.addRecombinant(individual.genome1, NULL, NULL, winner.genome1, NULL, NULL, parent1=individual);
            child.tag = 0;
        }
    }";

pub const REPRO_SPERM_DIO_P0: &str = "\
// ovules sample pollen from unrelated sporophytes
    if (individual.tagL0) {
        pool = p0.individuals[!p0.individuals.tagL0];
        if (!pool.size())
            return;
        if (pollen_comp) {
            candidates = sample(pool, min(stigma_pollen_per, pool.size()));
            winner = sample(candidates, 1, weights=p0.cachedFitness(candidates.index));
        }
        else {
            winner = sample(pool, 1);
        }
        if (runif(1) < pollen_success_rate) {
            child = p1.addRecombinant(individual.genome1, NULL, NULL, winner.genome1, NULL, NULL, parent1=individual);
            child.tag = 0;
            child.tagL0 = (runif(1) < spo_female_to_male_ratio);
        }
    }";
