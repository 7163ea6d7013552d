pub mod image_cache_memory;
